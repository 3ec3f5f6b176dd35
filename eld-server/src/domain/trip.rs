//! Trip-plan model returned by the planning service.
//!
//! These are the validated domain types: the planner client converts the
//! loose wire format into them once, and everything downstream (map, day
//! sheets, export) reads them without re-checking. A plan is immutable once
//! built; a new planning request produces a new plan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::DutyStatus;
use super::time::{ClockTime, TimeError};

/// A point on the route polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

/// What a planned stop is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Pickup,
    Dropoff,
    Rest,
    Fuel,
    /// Any other stop type; the planner's label is kept.
    #[serde(untagged)]
    Other(String),
}

impl StopKind {
    /// Classify a planner stop type, case-insensitively.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "pickup" => StopKind::Pickup,
            "dropoff" => StopKind::Dropoff,
            "rest" => StopKind::Rest,
            "fuel" => StopKind::Fuel,
            _ => StopKind::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StopKind::Pickup => "pickup",
            StopKind::Dropoff => "dropoff",
            StopKind::Rest => "rest",
            StopKind::Fuel => "fuel",
            StopKind::Other(label) => label,
        }
    }
}

/// A planned stop along the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub lat: f64,
    pub lng: f64,
    pub kind: StopKind,
    pub duration_min: f64,
}

/// One interval of a driver's day.
///
/// Times are kept as the planner sent them. They are only interpreted when
/// the day is laid out, where a malformed time degrades that one segment
/// instead of rejecting the whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyStatusSegment {
    pub status: DutyStatus,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DutyStatusSegment {
    pub fn new(status: DutyStatus, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            status,
            start: start.into(),
            end: end.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parsed start time.
    pub fn start_time(&self) -> Result<ClockTime, TimeError> {
        ClockTime::parse(&self.start)
    }

    /// Parsed end time.
    pub fn end_time(&self) -> Result<ClockTime, TimeError> {
        ClockTime::parse(&self.end)
    }

    /// Non-empty description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Aggregate figures for one day, computed by the planner.
///
/// Figures are kept as display text exactly as the planner sent them; they
/// are never interpreted. Every field is optional: a partial summary renders
/// as empty cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub miles_driven: Option<String>,
    pub driving_hours: Option<String>,
    pub on_duty_hours: Option<String>,
    pub break_minutes: Option<String>,
    pub off_duty_hours: Option<String>,
    pub hos_notes: Option<String>,
}

/// The duty-status log for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    /// Calendar date as sent by the planner (normally `YYYY-MM-DD`).
    pub date: String,
    pub summary: DaySummary,
    pub segments: Vec<DutyStatusSegment>,
}

impl DayLog {
    /// The date, if it is in ISO `YYYY-MM-DD` form.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Heading shown above the day's sheet, e.g. "Date: 2025-06-02 (Monday)".
    pub fn heading(&self) -> String {
        match self.calendar_date() {
            Some(date) => format!("Date: {} ({})", self.date.trim(), date.format("%A")),
            None => format!("Date: {}", self.date),
        }
    }
}

/// The planner's complete answer for one trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPlanResult {
    pub route: Vec<RoutePoint>,
    pub stops: Vec<Stop>,
    pub eld_logs: Vec<DayLog>,
}

impl TripPlanResult {
    /// Whether there is nothing to show at all.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty() && self.stops.is_empty() && self.eld_logs.is_empty()
    }
}
