//! Clock time handling for duty-status logs.
//!
//! The planner reports segment boundaries as "HH:MM" strings within a single
//! day. This module maps them onto a continuous hour scale (`0.0..=24.0`)
//! used by the grid layout. There is no time-zone or calendar handling here:
//! a clock time is purely an offset into its day.

use std::fmt;

/// Hours in one log day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Error returned when a clock time has no usable hour component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A within-day offset parsed from an "HH:MM" string.
///
/// Parsing is lenient in the same places the planner is loose:
/// the minute component defaults to zero when it is missing or not a number,
/// and `24:00` is accepted as the end of the day. Only the hour component
/// is mandatory.
///
/// # Examples
///
/// ```
/// use eld_server::domain::ClockTime;
///
/// assert_eq!(ClockTime::parse("06:30").unwrap().hours(), 6.5);
/// assert_eq!(ClockTime::parse("23:00").unwrap().hours(), 23.0);
/// assert_eq!(ClockTime::parse("07").unwrap().hours(), 7.0);
/// assert_eq!(ClockTime::parse("24:00").unwrap().hours(), 24.0);
///
/// // No usable hour
/// assert!(ClockTime::parse("noon").is_err());
/// assert!(ClockTime::parse(":30").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct ClockTime {
    hours: f64,
}

impl ClockTime {
    /// Midnight at the start of the day.
    pub const START_OF_DAY: ClockTime = ClockTime { hours: 0.0 };

    /// Midnight at the end of the day.
    pub const END_OF_DAY: ClockTime = ClockTime {
        hours: HOURS_PER_DAY,
    };

    /// Parse a clock time, splitting on the first `:`.
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let mut parts = text.trim().splitn(2, ':');

        let hour_text = parts.next().unwrap_or_default().trim();
        if hour_text.is_empty() {
            return Err(TimeError::new(text, "missing hour"));
        }
        let hour: f64 = hour_text
            .parse()
            .map_err(|_| TimeError::new(text, "hour is not a number"))?;
        if !hour.is_finite() {
            return Err(TimeError::new(text, "hour is not finite"));
        }

        let minute = parts
            .next()
            .and_then(|m| m.trim().parse::<f64>().ok())
            .filter(|m| m.is_finite())
            .unwrap_or(0.0);

        Ok(Self {
            hours: hour + minute / 60.0,
        })
    }

    /// Build a clock time from a fractional hour.
    pub fn from_hours(hours: f64) -> Option<Self> {
        hours.is_finite().then_some(Self { hours })
    }

    /// Fractional hour of the day, e.g. `6.5` for "06:30".
    ///
    /// Not clamped: a planner that reports "25:00" gets `25.0` back.
    pub fn hours(&self) -> f64 {
        self.hours
    }

    /// Fractional hour clamped to the bounds of one day.
    pub fn hours_in_day(&self) -> f64 {
        self.hours.clamp(0.0, HOURS_PER_DAY)
    }
}

/// Parse a clock time into a fractional hour, or `None` if the hour is unusable.
///
/// Shorthand for [`ClockTime::parse`] when only the number matters.
pub fn parse_clock_time(text: &str) -> Option<f64> {
    ClockTime::parse(text).ok().map(|t| t.hours())
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_minutes = (self.hours * 60.0).round() as i64;
        write!(
            f,
            "{:02}:{:02}",
            total_minutes.div_euclid(60),
            total_minutes.rem_euclid(60)
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every valid HH:MM maps to H + M/60.
        #[test]
        fn valid_hhmm_maps_to_fraction(hour in 0u32..=24, minute in 0u32..60) {
            let text = format!("{hour:02}:{minute:02}");
            let parsed = ClockTime::parse(&text).unwrap().hours();
            let expected = hour as f64 + minute as f64 / 60.0;
            prop_assert!((parsed - expected).abs() < 1e-9);
        }

        /// Display of a parsed in-day time reproduces the input.
        #[test]
        fn display_roundtrip(hour in 0u32..24, minute in 0u32..60) {
            let text = format!("{hour:02}:{minute:02}");
            prop_assert_eq!(ClockTime::parse(&text).unwrap().to_string(), text);
        }

        /// Parsing never panics, whatever the input.
        #[test]
        fn parse_never_panics(text in ".{0,12}") {
            let _ = ClockTime::parse(&text);
        }

        /// Clamped hours always stay within the day.
        #[test]
        fn clamped_within_day(hour in -100i32..100, minute in 0u32..60) {
            let text = format!("{hour}:{minute:02}");
            if let Ok(t) = ClockTime::parse(&text) {
                let h = t.hours_in_day();
                prop_assert!((0.0..=HOURS_PER_DAY).contains(&h));
            }
        }
    }
}
