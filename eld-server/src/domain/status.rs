//! Duty-status classification.
//!
//! Every duty status maps to one fixed grid row and one fixed display color.
//! The mapping is total: labels outside the known set become
//! [`DutyStatus::Unknown`] and are still drawn, in a neutral color on the
//! first row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of drawn rows in the duty-status grid.
pub const ROW_COUNT: usize = 4;

/// Row labels, top to bottom, indexed by row number.
pub const ROW_LABELS: [&str; ROW_COUNT] = ["Off Duty", "Sleeper", "Driving", "On Duty"];

/// A driver's duty status for one interval of the day.
///
/// `Break` is reported by the planner but only counted in the day summary;
/// it has a legend color and no grid row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DutyStatus {
    OffDuty,
    Sleeper,
    Driving,
    OnDuty,
    Break,
    /// A label the planner sent that matches none of the above.
    Unknown(String),
}

impl DutyStatus {
    /// Classify a planner label.
    ///
    /// Matching ignores case, spaces, underscores and hyphens, so
    /// "Off Duty", "off_duty" and "OffDuty" are the same status.
    ///
    /// # Examples
    ///
    /// ```
    /// use eld_server::domain::DutyStatus;
    ///
    /// assert_eq!(DutyStatus::from_label("On Duty"), DutyStatus::OnDuty);
    /// assert_eq!(DutyStatus::from_label("sleeper_berth"), DutyStatus::Sleeper);
    /// assert_eq!(
    ///     DutyStatus::from_label("Yard Move"),
    ///     DutyStatus::Unknown("Yard Move".into())
    /// );
    /// ```
    pub fn from_label(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "offduty" | "off" => DutyStatus::OffDuty,
            "sleeper" | "sleeperberth" | "sb" => DutyStatus::Sleeper,
            "driving" | "drive" => DutyStatus::Driving,
            "onduty" | "on" => DutyStatus::OnDuty,
            "break" => DutyStatus::Break,
            _ => DutyStatus::Unknown(label.to_string()),
        }
    }

    /// Display label. Unknown statuses keep the planner's original text.
    pub fn label(&self) -> &str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::Sleeper => "Sleeper",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "On Duty",
            DutyStatus::Break => "Break",
            DutyStatus::Unknown(label) => label,
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DutyStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DutyStatus::from_label(s))
    }
}

impl From<String> for DutyStatus {
    fn from(label: String) -> Self {
        DutyStatus::from_label(&label)
    }
}

impl From<DutyStatus> for String {
    fn from(status: DutyStatus) -> Self {
        status.label().to_string()
    }
}

/// An sRGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as fractions in `0.0..=1.0`.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// This color painted at `alpha` over an opaque white background.
    pub fn over_white(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Self::new(blend(self.r), blend(self.g), blend(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color used for labels the palette does not know.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xee, 0xee, 0xee);

/// The closed legend palette, in legend order.
pub const PALETTE: [(DutyStatusKind, Rgb); 5] = [
    (DutyStatusKind::OnDuty, Rgb::new(0xf8, 0xc4, 0x71)),
    (DutyStatusKind::Driving, Rgb::new(0x58, 0xd6, 0x8d)),
    (DutyStatusKind::Break, Rgb::new(0x85, 0xc1, 0xe9)),
    (DutyStatusKind::OffDuty, Rgb::new(0xd5, 0xdb, 0xdb)),
    (DutyStatusKind::Sleeper, Rgb::new(0xbb, 0x8f, 0xce)),
];

/// Field-less mirror of the known statuses, usable in constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DutyStatusKind {
    OffDuty,
    Sleeper,
    Driving,
    OnDuty,
    Break,
}

impl DutyStatusKind {
    pub fn status(self) -> DutyStatus {
        match self {
            DutyStatusKind::OffDuty => DutyStatus::OffDuty,
            DutyStatusKind::Sleeper => DutyStatus::Sleeper,
            DutyStatusKind::Driving => DutyStatus::Driving,
            DutyStatusKind::OnDuty => DutyStatus::OnDuty,
            DutyStatusKind::Break => DutyStatus::Break,
        }
    }
}

/// Standard grid row for a status.
///
/// `Break` has no row. Unknown labels go on row 0 with the off-duty bars.
pub fn status_row(status: &DutyStatus) -> Option<usize> {
    match status {
        DutyStatus::OffDuty => Some(0),
        DutyStatus::Sleeper => Some(1),
        DutyStatus::Driving => Some(2),
        DutyStatus::OnDuty => Some(3),
        DutyStatus::Break => None,
        DutyStatus::Unknown(_) => Some(0),
    }
}

/// Standard palette color for a status.
pub fn status_color(status: &DutyStatus) -> Rgb {
    PALETTE
        .iter()
        .find(|(kind, _)| kind.status() == *status)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// The row and color lookups used to draw a grid.
///
/// Layout takes these as values rather than reading globals, so a test or an
/// alternate theme can swap either lookup.
#[derive(Debug, Clone, Copy)]
pub struct StatusStyle {
    pub row: fn(&DutyStatus) -> Option<usize>,
    pub color: fn(&DutyStatus) -> Rgb,
}

impl StatusStyle {
    pub fn row_of(&self, status: &DutyStatus) -> Option<usize> {
        (self.row)(status)
    }

    pub fn color_of(&self, status: &DutyStatus) -> Rgb {
        (self.color)(status)
    }
}

impl Default for StatusStyle {
    fn default() -> Self {
        Self {
            row: status_row,
            color: status_color,
        }
    }
}
