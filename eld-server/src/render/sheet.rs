//! Day sheet assembly.
//!
//! A day sheet is everything shown for one calendar day: the summary table,
//! the duty-status grid, the legend, and a plain-text restatement of each
//! segment. Nothing is recomputed here; summary figures pass through as the
//! planner reported them.

use crate::domain::{DayLog, DaySummary, DutyStatusSegment, PALETTE, Rgb, StatusStyle};

use super::grid::{RenderModel, layout_day};

/// Column headings of the summary table, in display order.
pub const SUMMARY_HEADINGS: [&str; 6] = [
    "Miles Driven",
    "Driving Hours",
    "On Duty",
    "Break",
    "Off Duty",
    "HOS Notes",
];

/// One cell of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCell {
    pub heading: &'static str,
    /// Empty when the planner left the figure out.
    pub value: String,
}

/// One legend swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// Text line describing one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLine {
    pub status: String,
    pub start: String,
    pub end: String,
    pub description: Option<String>,
    /// Set when the segment's times could not be placed on the grid.
    pub unplotted: bool,
}

impl SegmentLine {
    fn from_segment(segment: &DutyStatusSegment, unplotted: bool) -> Self {
        Self {
            status: segment.status.label().to_string(),
            start: segment.start.clone(),
            end: segment.end.clone(),
            description: segment.description().map(str::to_string),
            unplotted,
        }
    }

    /// The times and description, e.g. "06:00 – 10:00 (Pre-trip inspection)".
    pub fn detail(&self) -> String {
        let mut detail = format!("{} – {}", self.start, self.end);
        if let Some(description) = &self.description {
            detail.push_str(&format!(" ({description})"));
        }
        if self.unplotted {
            detail.push_str(" [time not understood, not plotted]");
        }
        detail
    }

    /// Full line, e.g. "Driving: 06:00 – 10:00 (Driving)".
    pub fn text(&self) -> String {
        format!("{}: {}", self.status, self.detail())
    }
}

/// Everything rendered for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySheet {
    pub heading: String,
    pub summary: Vec<SummaryCell>,
    pub grid: RenderModel,
    pub legend: Vec<LegendEntry>,
    pub segments: Vec<SegmentLine>,
}

impl DaySheet {
    /// Build the sheet for one day.
    pub fn assemble(log: &DayLog, style: &StatusStyle) -> Self {
        let grid = layout_day(&log.segments, style);

        let segments = log
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| SegmentLine::from_segment(segment, grid.is_skipped(i)))
            .collect();

        Self {
            heading: log.heading(),
            summary: summary_cells(&log.summary),
            grid,
            legend: legend(style),
            segments,
        }
    }
}

fn summary_cells(summary: &DaySummary) -> Vec<SummaryCell> {
    let figure = |value: &Option<String>| value.clone().unwrap_or_default();

    let values = [
        figure(&summary.miles_driven),
        figure(&summary.driving_hours),
        figure(&summary.on_duty_hours),
        summary
            .break_minutes
            .as_ref()
            .map(|m| format!("{m} min"))
            .unwrap_or_default(),
        figure(&summary.off_duty_hours),
        figure(&summary.hos_notes),
    ];

    SUMMARY_HEADINGS
        .into_iter()
        .zip(values)
        .map(|(heading, value)| SummaryCell { heading, value })
        .collect()
}

/// The full palette, whatever the day actually drew.
fn legend(style: &StatusStyle) -> Vec<LegendEntry> {
    PALETTE
        .iter()
        .map(|(kind, _)| {
            let status = kind.status();
            LegendEntry {
                label: status.label().to_string(),
                color: style.color_of(&status),
            }
        })
        .collect()
}
