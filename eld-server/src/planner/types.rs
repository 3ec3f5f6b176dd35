//! Planning service wire types.
//!
//! These mirror the JSON the planning backend speaks. They are loose: most
//! fields are optional or defaulted, and summary figures may be numbers or
//! free text. [`super::convert`] turns them into validated
//! domain types.

use serde::{Deserialize, Serialize};

use super::error::RequestError;

/// Highest cycle-hours value accepted (the 70-hour/8-day limit).
pub const MAX_CYCLE_HOURS: f64 = 70.0;

/// Trip-planning request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,
}

impl PlanTripRequest {
    /// Check the request before it is sent anywhere.
    ///
    /// Locations are trimmed in place.
    pub fn validate(&mut self) -> Result<(), RequestError> {
        for (field, value) in [
            ("current_location", &mut self.current_location),
            ("pickup_location", &mut self.pickup_location),
            ("dropoff_location", &mut self.dropoff_location),
        ] {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(RequestError::EmptyLocation(field));
            }
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }

        let hours = self.current_cycle_hours;
        if !hours.is_finite() || !(0.0..=MAX_CYCLE_HOURS).contains(&hours) {
            return Err(RequestError::CycleHoursOutOfRange(hours));
        }
        Ok(())
    }
}

/// Successful planning response.
#[derive(Debug, Clone, Deserialize)]
pub struct TripPlanResponse {
    #[serde(default)]
    pub route: Vec<RoutePointDto>,
    #[serde(default)]
    pub stops: Vec<StopDto>,
    #[serde(default)]
    pub eld_logs: Vec<DayLogDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutePointDto {
    pub lat: f64,
    pub lng: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub lat: f64,
    pub lng: f64,
    /// Stop type: "pickup", "dropoff", "rest", "fuel", or anything else.
    #[serde(rename = "type")]
    pub kind: String,
    pub duration_min: Option<NumberOrString>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayLogDto {
    pub date: String,
    #[serde(default)]
    pub summary: Option<SummaryDto>,
    /// Segments in planner order.
    #[serde(default, alias = "segments")]
    pub statuses: Vec<SegmentDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentDto {
    pub status: String,
    pub start: String,
    pub end: String,
    #[serde(default, alias = "description")]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryDto {
    pub miles_driven: Option<NumberOrString>,
    pub driving_hours: Option<NumberOrString>,
    pub on_duty_hours: Option<NumberOrString>,
    pub break_minutes: Option<NumberOrString>,
    pub off_duty_hours: Option<NumberOrString>,
    pub hos_notes: Option<String>,
}

/// A figure sent either as a JSON number or as a string such as `"8.5"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    /// The value as display text: numbers formatted, strings as sent.
    /// `None` for a blank string.
    pub fn display_text(&self) -> Option<String> {
        match self {
            NumberOrString::Number(n) => Some(n.to_string()),
            NumberOrString::Text(s) if s.trim().is_empty() => None,
            NumberOrString::Text(s) => Some(s.clone()),
        }
    }

    /// The numeric value; `Ok(None)` for a blank string.
    pub fn value(&self) -> Result<Option<f64>, String> {
        match self {
            NumberOrString::Number(n) => Ok(Some(*n)),
            NumberOrString::Text(s) if s.trim().is_empty() => Ok(None),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| s.clone()),
        }
    }
}

/// Body of a failed planning response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
