//! Multi-day log book.
//!
//! Lays the day sheets of a trip out on one surface, in the order the
//! planner listed the days. Sheets stack top to bottom; once a single stack
//! would be taller than it is wide, they flow into side-by-side columns
//! (day order runs down each column, then across) so the surface stays
//! landscape. The resulting geometry is what the PDF export draws; the HTML
//! view uses the sheets directly.

use tracing::debug;

use crate::domain::{DayLog, StatusStyle};

use super::grid::{GRID_HEIGHT, GRID_WIDTH};
use super::sheet::DaySheet;

/// Blank border around the whole book.
pub const BOOK_MARGIN: f64 = 20.0;

/// Space between consecutive sheets, and between columns.
pub const SHEET_GAP: f64 = 24.0;

/// Band holding the date heading.
pub const HEADING_HEIGHT: f64 = 28.0;

/// Band holding the two-row summary table.
pub const SUMMARY_HEIGHT: f64 = 48.0;

/// Band holding the legend swatches.
pub const LEGEND_HEIGHT: f64 = 28.0;

/// Height of one segment text line.
pub const SEGMENT_LINE_HEIGHT: f64 = 18.0;

/// A day sheet with its position in the book.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSheet {
    pub sheet: DaySheet,
    /// Left edge of every band, in book units from the left of the surface.
    pub left: f64,
    /// Top edge, in book units from the top of the surface.
    pub top: f64,
    pub height: f64,
}

impl PlacedSheet {
    pub fn right(&self) -> f64 {
        self.left + GRID_WIDTH
    }

    pub fn summary_top(&self) -> f64 {
        self.top + HEADING_HEIGHT
    }

    pub fn grid_top(&self) -> f64 {
        self.summary_top() + SUMMARY_HEIGHT
    }

    pub fn legend_top(&self) -> f64 {
        self.grid_top() + GRID_HEIGHT
    }

    pub fn segments_top(&self) -> f64 {
        self.legend_top() + LEGEND_HEIGHT
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Height one sheet occupies in the book.
pub fn sheet_height(sheet: &DaySheet) -> f64 {
    HEADING_HEIGHT
        + SUMMARY_HEIGHT
        + GRID_HEIGHT
        + LEGEND_HEIGHT
        + SEGMENT_LINE_HEIGHT * sheet.segments.len() as f64
}

/// Surface size when consecutive sheets are grouped `per_column` to a
/// column.
fn surface_size(heights: &[f64], per_column: usize) -> (f64, f64) {
    let columns = heights.chunks(per_column);
    let count = columns.len() as f64;
    let tallest = columns
        .map(|column| column.iter().sum::<f64>() + SHEET_GAP * (column.len() - 1) as f64)
        .fold(0.0, f64::max);

    (
        count * GRID_WIDTH + (count - 1.0) * SHEET_GAP + 2.0 * BOOK_MARGIN,
        tallest + 2.0 * BOOK_MARGIN,
    )
}

/// All day sheets of a trip, laid out on one surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogBook {
    pub sheets: Vec<PlacedSheet>,
    pub width: f64,
    pub height: f64,
}

impl LogBook {
    /// Render every day, preserving input order.
    ///
    /// No days means an empty book with a zero-sized surface: nothing has
    /// been planned yet, which is not an error.
    pub fn render(logs: &[DayLog], style: &StatusStyle) -> Self {
        if logs.is_empty() {
            return Self::default();
        }

        let assembled: Vec<DaySheet> = logs
            .iter()
            .map(|log| DaySheet::assemble(log, style))
            .collect();
        let heights: Vec<f64> = assembled.iter().map(sheet_height).collect();

        // Fewest columns that give a landscape surface; one sheet per column
        // if even that is taller than wide.
        let per_column = (1..=heights.len())
            .rev()
            .find(|&per_column| {
                let (width, height) = surface_size(&heights, per_column);
                width > height
            })
            .unwrap_or(1);
        let (width, book_height) = surface_size(&heights, per_column);

        let mut sheets = Vec::with_capacity(assembled.len());
        let mut left = BOOK_MARGIN;
        let mut top = BOOK_MARGIN;

        for (i, (sheet, height)) in assembled.into_iter().zip(heights).enumerate() {
            if i > 0 && i % per_column == 0 {
                left += GRID_WIDTH + SHEET_GAP;
                top = BOOK_MARGIN;
            }
            sheets.push(PlacedSheet {
                sheet,
                left,
                top,
                height,
            });
            top += height + SHEET_GAP;
        }

        debug!(
            days = sheets.len(),
            per_column,
            width,
            height = book_height,
            "log book laid out"
        );

        Self {
            sheets,
            width,
            height: book_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Day sheets in order, without placement.
    pub fn day_sheets(&self) -> impl Iterator<Item = &DaySheet> {
        self.sheets.iter().map(|p| &p.sheet)
    }
}
