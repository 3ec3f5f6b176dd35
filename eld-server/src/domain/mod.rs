//! Domain types for duty-status log rendering.
//!
//! This module holds the validated trip-plan model and the two small pieces
//! of domain logic everything else builds on: clock-time parsing and
//! duty-status classification.

mod status;
mod time;
mod trip;

pub use status::{
    DutyStatus, DutyStatusKind, FALLBACK_COLOR, PALETTE, ROW_COUNT, ROW_LABELS, Rgb, StatusStyle,
    status_color, status_row,
};
pub use time::{ClockTime, HOURS_PER_DAY, TimeError, parse_clock_time};
pub use trip::{DayLog, DaySummary, DutyStatusSegment, RoutePoint, Stop, StopKind, TripPlanResult};
