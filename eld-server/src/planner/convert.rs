//! Conversion from planner DTOs to domain types.
//!
//! This is the one place a plan is validated. A bad coordinate or stop
//! duration rejects the whole response. Clock times and summary figures are
//! left as text: times are only interpreted when a day is drawn, and figures
//! are shown as sent.

use tracing::warn;

use crate::domain::{
    DayLog, DaySummary, DutyStatus, DutyStatusSegment, RoutePoint, Stop, StopKind, TripPlanResult,
};

use super::types::{
    DayLogDto, NumberOrString, RoutePointDto, SegmentDto, StopDto, SummaryDto, TripPlanResponse,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid coordinate for {what} {index}: ({lat}, {lng})")]
    InvalidCoordinate {
        what: &'static str,
        index: usize,
        lat: f64,
        lng: f64,
    },

    #[error("invalid duration for stop {index}: {value:?}")]
    InvalidDuration { index: usize, value: String },
}

/// Label given to route points the planner left unnamed.
const DEFAULT_ROUTE_LABEL: &str = "Route";

/// Convert a planning response to a validated trip plan.
pub fn convert_trip_plan(response: &TripPlanResponse) -> Result<TripPlanResult, ConversionError> {
    let route = response
        .route
        .iter()
        .enumerate()
        .map(|(i, point)| convert_route_point(i, point))
        .collect::<Result<Vec<_>, _>>()?;

    let stops = response
        .stops
        .iter()
        .enumerate()
        .map(|(i, stop)| convert_stop(i, stop))
        .collect::<Result<Vec<_>, _>>()?;

    let eld_logs = response.eld_logs.iter().map(convert_day).collect();

    Ok(TripPlanResult {
        route,
        stops,
        eld_logs,
    })
}

fn check_coordinate(
    what: &'static str,
    index: usize,
    lat: f64,
    lng: f64,
) -> Result<(), ConversionError> {
    let valid = lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng);
    if valid {
        Ok(())
    } else {
        Err(ConversionError::InvalidCoordinate {
            what,
            index,
            lat,
            lng,
        })
    }
}

fn convert_route_point(index: usize, dto: &RoutePointDto) -> Result<RoutePoint, ConversionError> {
    check_coordinate("route point", index, dto.lat, dto.lng)?;
    Ok(RoutePoint {
        lat: dto.lat,
        lng: dto.lng,
        label: dto
            .label
            .clone()
            .unwrap_or_else(|| DEFAULT_ROUTE_LABEL.to_string()),
    })
}

fn convert_stop(index: usize, dto: &StopDto) -> Result<Stop, ConversionError> {
    check_coordinate("stop", index, dto.lat, dto.lng)?;

    let duration_min = match &dto.duration_min {
        None => 0.0,
        Some(raw) => match raw.value() {
            Ok(v) => v.unwrap_or(0.0),
            Err(value) => return Err(ConversionError::InvalidDuration { index, value }),
        },
    };
    if duration_min < 0.0 {
        return Err(ConversionError::InvalidDuration {
            index,
            value: duration_min.to_string(),
        });
    }

    let kind = StopKind::from_label(&dto.kind);
    if let StopKind::Other(label) = &kind {
        warn!(stop = index, kind = %label, "unrecognised stop type, using generic marker");
    }

    Ok(Stop {
        lat: dto.lat,
        lng: dto.lng,
        kind,
        duration_min,
    })
}

fn convert_day(dto: &DayLogDto) -> DayLog {
    DayLog {
        date: dto.date.clone(),
        summary: dto
            .summary
            .as_ref()
            .map(convert_summary)
            .unwrap_or_default(),
        segments: dto.statuses.iter().map(convert_segment).collect(),
    }
}

fn convert_summary(dto: &SummaryDto) -> DaySummary {
    let figure =
        |raw: &Option<NumberOrString>| raw.as_ref().and_then(NumberOrString::display_text);

    DaySummary {
        miles_driven: figure(&dto.miles_driven),
        driving_hours: figure(&dto.driving_hours),
        on_duty_hours: figure(&dto.on_duty_hours),
        break_minutes: figure(&dto.break_minutes),
        off_duty_hours: figure(&dto.off_duty_hours),
        hos_notes: dto.hos_notes.clone(),
    }
}

fn convert_segment(dto: &SegmentDto) -> DutyStatusSegment {
    let status = DutyStatus::from_label(&dto.status);
    if let DutyStatus::Unknown(label) = &status {
        warn!(status = %label, start = %dto.start, "unrecognised duty status");
    }
    DutyStatusSegment {
        status,
        start: dto.start.clone(),
        end: dto.end.clone(),
        description: dto.desc.clone(),
    }
}
