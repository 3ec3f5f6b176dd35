//! Daily log rendering.
//!
//! Pipeline, per day: grid layout, then sheet assembly; per trip: the log
//! book that lays all sheets out on one surface. Every stage is a pure function of the trip
//! plan, rebuilt from scratch whenever a plan is shown or exported.

mod book;
mod grid;
mod sheet;

pub use book::{
    BOOK_MARGIN, HEADING_HEIGHT, LEGEND_HEIGHT, LogBook, PlacedSheet, SEGMENT_LINE_HEIGHT,
    SHEET_GAP, SUMMARY_HEIGHT, sheet_height,
};
pub use grid::{
    BAR_HEIGHT, BAR_OPACITY, Bar, GRID_HEIGHT, GRID_WIDTH, GridLine, HEADER_HEIGHT, HOUR_WIDTH,
    ROW_HEIGHT, RenderModel, SkippedSegment, TextLabel, hour_to_x, layout_day, row_to_y,
};
pub use sheet::{DaySheet, LegendEntry, SUMMARY_HEADINGS, SegmentLine, SummaryCell};
