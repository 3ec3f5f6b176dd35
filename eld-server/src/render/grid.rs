//! Duty-status grid layout.
//!
//! Turns one day's segments into drawing primitives on a fixed surface:
//! 24 hour columns of [`HOUR_WIDTH`] units across, a [`HEADER_HEIGHT`] band
//! for the hour labels, then one [`ROW_HEIGHT`] row per drawn status.
//!
//! ```text
//!  0   1   2  ...                          24
//! +---+---+---+----------------------------+   y = 30
//! | Off Duty                               |
//! +----------------------------------------+   y = 60
//! | Sleeper                                |
//! +----------------------------------------+   y = 90
//! | Driving                                |
//! +----------------------------------------+   y = 120
//! | On Duty                                |
//! +----------------------------------------+   y = 150
//! ```
//!
//! Layout is a pure function of its input. Segments are drawn in the order
//! given, so later bars overlay earlier ones.

use tracing::{debug, warn};

use crate::domain::{
    DutyStatusSegment, HOURS_PER_DAY, ROW_COUNT, ROW_LABELS, Rgb, StatusStyle, TimeError,
};

/// Width of the grid surface.
pub const GRID_WIDTH: f64 = 1000.0;

/// Width of one hour column.
pub const HOUR_WIDTH: f64 = 40.0;

/// Height of the band above the rows that holds the hour labels.
pub const HEADER_HEIGHT: f64 = 30.0;

/// Height of one status row.
pub const ROW_HEIGHT: f64 = 30.0;

/// Height of the grid surface: header plus all status rows, 150 units.
///
/// A 140-unit surface would cut through the On Duty row, whose bar spans
/// y 120..148, so the surface is sized to hold every row in full.
pub const GRID_HEIGHT: f64 = HEADER_HEIGHT + ROW_HEIGHT * ROW_COUNT as f64;

/// Height of a status bar, leaving a sliver of its row visible.
pub const BAR_HEIGHT: f64 = 28.0;

/// Fill opacity of status bars.
pub const BAR_OPACITY: f32 = 0.85;

/// Every n-th hour tick is drawn heavier, splitting the day into quarters.
pub const HEAVY_TICK_EVERY: usize = 6;

const ROW_LINE_COLOR: Rgb = Rgb::new(0x88, 0x88, 0x88);
const TICK_COLOR: Rgb = Rgb::new(0xbb, 0xbb, 0xbb);
const TEXT_COLOR: Rgb = Rgb::new(0x33, 0x33, 0x33);

const BAR_LABEL_SIZE: f64 = 12.0;
const ROW_LABEL_SIZE: f64 = 14.0;
const HOUR_LABEL_SIZE: f64 = 10.0;

/// A straight stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Rgb,
    pub stroke_width: f64,
}

/// A piece of text anchored at its baseline start.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub size: f64,
    pub color: Rgb,
}

/// A filled rectangle for one duty-status segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Position of the segment in the day's input.
    pub segment_index: usize,
    pub x: f64,
    pub y: f64,
    /// Never negative; inverted segments collapse to zero width.
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub opacity: f32,
    pub label: TextLabel,
}

impl Bar {
    /// Right edge.
    pub fn x2(&self) -> f64 {
        self.x + self.width
    }
}

/// A segment that could not be placed on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSegment {
    pub segment_index: usize,
    pub reason: String,
}

/// Drawing model for one day's grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub width: f64,
    pub height: f64,
    /// Row separators followed by hour ticks.
    pub lines: Vec<GridLine>,
    /// One bar per drawable segment, in input order.
    pub bars: Vec<Bar>,
    pub row_labels: Vec<TextLabel>,
    pub hour_labels: Vec<TextLabel>,
    /// Segments with unusable times, left off the grid.
    pub skipped: Vec<SkippedSegment>,
}

impl RenderModel {
    /// Whether the segment at `index` was left off the grid for bad data.
    pub fn is_skipped(&self, index: usize) -> bool {
        self.skipped.iter().any(|s| s.segment_index == index)
    }
}

/// Map a fractional hour to an x coordinate, clamped to the day.
pub fn hour_to_x(hours: f64) -> f64 {
    hours.clamp(0.0, HOURS_PER_DAY) * HOUR_WIDTH
}

/// Top edge of a status row.
pub fn row_to_y(row: usize) -> f64 {
    row as f64 * ROW_HEIGHT + HEADER_HEIGHT
}

/// Lay out one day's segments.
///
/// Segments whose status has no row (breaks) are not drawn. Segments with an
/// unparseable start or end are skipped and reported in
/// [`RenderModel::skipped`]; the rest of the day still renders.
pub fn layout_day(segments: &[DutyStatusSegment], style: &StatusStyle) -> RenderModel {
    let mut bars = Vec::with_capacity(segments.len());
    let mut skipped = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        let Some(row) = style.row_of(&segment.status) else {
            debug!(index, status = %segment.status, "segment has no grid row, not drawn");
            continue;
        };
        if row >= ROW_COUNT {
            warn!(index, row, "status row out of range, segment skipped");
            skipped.push(SkippedSegment {
                segment_index: index,
                reason: format!("row {row} is outside the grid"),
            });
            continue;
        }

        let span = segment
            .start_time()
            .and_then(|start| Ok((start, segment.end_time()?)));
        let (start, end) = match span {
            Ok(span) => span,
            Err(e) => {
                warn!(index, error = %e, "unparseable segment time, segment skipped");
                skipped.push(skip_reason(index, &e));
                continue;
            }
        };

        let x1 = hour_to_x(start.hours());
        let x2 = hour_to_x(end.hours());
        let y = row_to_y(row);

        bars.push(Bar {
            segment_index: index,
            x: x1,
            y,
            width: (x2 - x1).max(0.0),
            height: BAR_HEIGHT,
            fill: style.color_of(&segment.status),
            opacity: BAR_OPACITY,
            label: TextLabel {
                x: x1 + 5.0,
                y: y + 18.0,
                text: segment.status.label().to_string(),
                size: BAR_LABEL_SIZE,
                color: TEXT_COLOR,
            },
        });
    }

    RenderModel {
        width: GRID_WIDTH,
        height: GRID_HEIGHT,
        lines: grid_lines(),
        bars,
        row_labels: row_labels(),
        hour_labels: hour_labels(),
        skipped,
    }
}

fn skip_reason(index: usize, error: &TimeError) -> SkippedSegment {
    SkippedSegment {
        segment_index: index,
        reason: error.to_string(),
    }
}

/// Row separators, then one tick per hour boundary.
fn grid_lines() -> Vec<GridLine> {
    let separators = (0..ROW_COUNT).map(|row| {
        let y = row_to_y(row);
        GridLine {
            x1: 0.0,
            y1: y,
            x2: GRID_WIDTH,
            y2: y,
            color: ROW_LINE_COLOR,
            stroke_width: 1.0,
        }
    });

    let ticks = (0..=HOURS_PER_DAY as usize).map(|hour| {
        let x = hour as f64 * HOUR_WIDTH;
        GridLine {
            x1: x,
            y1: HEADER_HEIGHT,
            x2: x,
            y2: GRID_HEIGHT,
            color: TICK_COLOR,
            stroke_width: if hour % HEAVY_TICK_EVERY == 0 { 2.0 } else { 1.0 },
        }
    });

    separators.chain(ticks).collect()
}

/// Row names, vertically centred in their rows.
fn row_labels() -> Vec<TextLabel> {
    ROW_LABELS
        .iter()
        .enumerate()
        .map(|(row, label)| TextLabel {
            x: 5.0,
            y: row_to_y(row) + ROW_HEIGHT / 2.0 + 5.0,
            text: (*label).to_string(),
            size: ROW_LABEL_SIZE,
            color: TEXT_COLOR,
        })
        .collect()
}

/// Hour numbers `0..=24` across the header band.
fn hour_labels() -> Vec<TextLabel> {
    (0..=HOURS_PER_DAY as usize)
        .map(|hour| TextLabel {
            x: hour as f64 * HOUR_WIDTH + 2.0,
            y: HEADER_HEIGHT - 5.0,
            text: hour.to_string(),
            size: HOUR_LABEL_SIZE,
            color: TEXT_COLOR,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DutyStatus, Rgb, status_color};

    fn seg(status: DutyStatus, start: &str, end: &str) -> DutyStatusSegment {
        DutyStatusSegment::new(status, start, end)
    }

    fn layout(segments: &[DutyStatusSegment]) -> RenderModel {
        layout_day(segments, &StatusStyle::default())
    }

    #[test]
    fn driving_bar_geometry() {
        let model = layout(&[seg(DutyStatus::Driving, "08:00", "10:30")]);

        assert_eq!(model.bars.len(), 1);
        let bar = &model.bars[0];
        assert_eq!(bar.x, 320.0);
        assert_eq!(bar.x2(), 420.0);
        assert_eq!(bar.y, 90.0);
        assert_eq!(bar.height, 28.0);
        assert_eq!(bar.fill, status_color(&DutyStatus::Driving));
        assert_eq!(bar.opacity, 0.85);
        assert_eq!(bar.label.text, "Driving");
        assert_eq!((bar.label.x, bar.label.y), (325.0, 108.0));
    }

    #[test]
    fn rows_follow_status() {
        let model = layout(&[
            seg(DutyStatus::OffDuty, "00:00", "01:00"),
            seg(DutyStatus::Sleeper, "01:00", "02:00"),
            seg(DutyStatus::Driving, "02:00", "03:00"),
            seg(DutyStatus::OnDuty, "03:00", "04:00"),
        ]);
        let ys: Vec<f64> = model.bars.iter().map(|b| b.y).collect();
        assert_eq!(ys, vec![30.0, 60.0, 90.0, 120.0]);
    }

    #[test]
    fn background_lines() {
        let model = layout(&[]);

        // 4 row separators + 25 hour ticks
        assert_eq!(model.lines.len(), 29);

        let separators: Vec<f64> = model.lines[..4].iter().map(|l| l.y1).collect();
        assert_eq!(separators, vec![30.0, 60.0, 90.0, 120.0]);
        assert!(model.lines[..4].iter().all(|l| l.x1 == 0.0 && l.x2 == GRID_WIDTH));

        let ticks = &model.lines[4..];
        assert_eq!(ticks[0].x1, 0.0);
        assert_eq!(ticks[24].x1, 960.0);
        let heavy: Vec<f64> = ticks
            .iter()
            .filter(|l| l.stroke_width == 2.0)
            .map(|l| l.x1)
            .collect();
        assert_eq!(heavy, vec![0.0, 240.0, 480.0, 720.0, 960.0]);
    }

    #[test]
    fn labels() {
        let model = layout(&[]);

        let rows: Vec<&str> = model.row_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rows, vec!["Off Duty", "Sleeper", "Driving", "On Duty"]);
        assert_eq!(model.row_labels[2].y, 110.0);

        assert_eq!(model.hour_labels.len(), 25);
        assert_eq!(model.hour_labels[0].text, "0");
        assert_eq!(model.hour_labels[24].text, "24");
        assert!(model.hour_labels.iter().all(|l| l.y < HEADER_HEIGHT));
    }

    #[test]
    fn empty_day_has_only_background() {
        let model = layout(&[]);
        assert!(model.bars.is_empty());
        assert!(model.skipped.is_empty());
        assert_eq!(model.width, 1000.0);
        assert_eq!(model.height, 150.0);
    }

    #[test]
    fn inverted_segment_has_zero_width() {
        let model = layout(&[seg(DutyStatus::OnDuty, "14:00", "12:00")]);
        assert_eq!(model.bars[0].width, 0.0);
        assert_eq!(model.bars[0].x, 560.0);
    }

    #[test]
    fn zero_duration_segment() {
        let model = layout(&[seg(DutyStatus::OnDuty, "14:00", "14:00")]);
        assert_eq!(model.bars[0].width, 0.0);
    }

    #[test]
    fn break_is_not_drawn() {
        let model = layout(&[
            seg(DutyStatus::Driving, "06:00", "10:00"),
            seg(DutyStatus::Break, "10:00", "10:30"),
            seg(DutyStatus::Driving, "10:30", "14:00"),
        ]);
        let indices: Vec<usize> = model.bars.iter().map(|b| b.segment_index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(model.skipped.is_empty());
    }

    #[test]
    fn unknown_status_drawn_on_first_row_in_fallback_color() {
        let model = layout(&[seg(DutyStatus::from_label("Yard Move"), "05:00", "05:30")]);
        let bar = &model.bars[0];
        assert_eq!(bar.y, 30.0);
        assert_eq!(bar.fill, Rgb::new(0xee, 0xee, 0xee));
        assert_eq!(bar.label.text, "Yard Move");
    }

    #[test]
    fn malformed_time_skips_only_that_segment() {
        let model = layout(&[
            seg(DutyStatus::OffDuty, "00:00", "06:00"),
            seg(DutyStatus::Driving, "xx:00", "10:00"),
            seg(DutyStatus::OnDuty, "10:00", "later"),
            seg(DutyStatus::OffDuty, "12:00", "24:00"),
        ]);

        let drawn: Vec<usize> = model.bars.iter().map(|b| b.segment_index).collect();
        assert_eq!(drawn, vec![0, 3]);
        assert!(model.is_skipped(1));
        assert!(model.is_skipped(2));
        assert!(!model.is_skipped(0));
        assert!(model.skipped[0].reason.contains("xx:00"));
    }

    #[test]
    fn out_of_day_times_are_clamped() {
        let model = layout(&[seg(DutyStatus::OffDuty, "22:00", "26:00")]);
        assert_eq!(model.bars[0].x, 880.0);
        assert_eq!(model.bars[0].x2(), 960.0);
    }

    #[test]
    fn later_segments_overlay_earlier() {
        let model = layout(&[
            seg(DutyStatus::Driving, "08:00", "09:00"),
            seg(DutyStatus::Driving, "08:00", "09:00"),
        ]);
        assert_eq!(model.bars.len(), 2);
        assert_eq!(model.bars[0].segment_index, 0);
        assert_eq!(model.bars[1].segment_index, 1);
    }

    #[test]
    fn custom_style_out_of_range_row_is_skipped() {
        fn below_grid(_: &DutyStatus) -> Option<usize> {
            Some(ROW_COUNT)
        }
        let style = StatusStyle {
            row: below_grid,
            ..StatusStyle::default()
        };
        let model = layout_day(&[seg(DutyStatus::Driving, "08:00", "09:00")], &style);
        assert!(model.bars.is_empty());
        assert!(model.is_skipped(0));
    }

    #[test]
    fn rendering_is_idempotent() {
        let segments = vec![
            seg(DutyStatus::OffDuty, "00:00", "06:00"),
            seg(DutyStatus::Driving, "06:00", "10:00"),
            seg(DutyStatus::OnDuty, "bad", "11:00"),
        ];
        assert_eq!(layout(&segments), layout(&segments));
    }
}
