//! PDF export of a log book.
//!
//! The document is drawn directly with vector primitives: the same lines,
//! bars and labels as the on-screen grid, plus the heading, summary table,
//! legend and segment list of every day. The whole book goes on a single
//! page sized to the book surface at 2× supersampling, the way a captured
//! screenshot of the rendered page would be sized.

use std::io::BufWriter;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
    Polygon, Rgb as PdfRgb,
};
use tracing::{debug, info};

use crate::domain::Rgb;
use crate::render::{
    GRID_WIDTH, GridLine, LogBook, PlacedSheet, RenderModel, SEGMENT_LINE_HEIGHT, SUMMARY_HEIGHT,
    TextLabel,
};

use super::error::ExportError;

/// File name offered for download.
pub const EXPORT_FILE_NAME: &str = "eld-log-sheet.pdf";

/// Surface pixels per book unit.
pub const SUPERSAMPLE: f32 = 2.0;

/// PDF points per surface pixel (96 px to 72 pt per inch).
pub const POINTS_PER_PIXEL: f32 = 0.75;

/// Largest page edge most PDF readers accept (200 inches).
pub const MAX_PAGE_POINTS: f32 = 14_400.0;

const MM_PER_POINT: f32 = 25.4 / 72.0;

const HEADING_SIZE: f32 = 16.0;
const TABLE_TEXT_SIZE: f32 = 11.0;
const LEGEND_TEXT_SIZE: f32 = 11.0;
const SEGMENT_TEXT_SIZE: f32 = 11.0;

const INK: Rgb = Rgb::new(0x22, 0x22, 0x22);
const BORDER: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);
const TABLE_HEADER_FILL: Rgb = Rgb::new(0xf4, 0xf6, 0xfa);
const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

const LEGEND_CHIP_WIDTH: f64 = 76.0;
const LEGEND_CHIP_HEIGHT: f64 = 18.0;
const SEGMENT_DETAIL_OFFSET: f64 = 80.0;

/// A finished export.
#[derive(Debug, Clone)]
pub struct PdfExport {
    pub bytes: Vec<u8>,
    pub width_pt: f32,
    pub height_pt: f32,
    pub days: usize,
}

/// Page size in points for a book surface.
pub fn page_size_pt(book: &LogBook) -> (f32, f32) {
    (
        book.width as f32 * SUPERSAMPLE * POINTS_PER_PIXEL,
        book.height as f32 * SUPERSAMPLE * POINTS_PER_PIXEL,
    )
}

/// Render a log book to PDF bytes.
///
/// Returns `Ok(None)` for an empty book: with nothing rendered there is
/// nothing to export, and that is not an error.
pub fn export_pdf(book: &LogBook, title: &str) -> Result<Option<PdfExport>, ExportError> {
    if book.is_empty() {
        debug!("export requested with no day sheets, nothing to do");
        return Ok(None);
    }

    let (width_pt, height_pt) = page_size_pt(book);
    if width_pt > MAX_PAGE_POINTS || height_pt > MAX_PAGE_POINTS {
        return Err(ExportError::SurfaceTooLarge {
            width_pt,
            height_pt,
            max_pt: MAX_PAGE_POINTS,
        });
    }

    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(width_pt * MM_PER_POINT),
        Mm(height_pt * MM_PER_POINT),
        "Log sheets",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let canvas = Canvas {
        layer: doc.get_page(page).get_layer(layer),
        regular,
        bold,
        page_height_pt: height_pt,
    };

    for placed in &book.sheets {
        draw_sheet(&canvas, placed);
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    info!(
        days = book.len(),
        bytes = bytes.len(),
        width_pt,
        height_pt,
        "exported log sheets"
    );

    Ok(Some(PdfExport {
        bytes,
        width_pt,
        height_pt,
        days: book.len(),
    }))
}

/// Drawing surface in book units: origin top-left, y growing down.
struct Canvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    page_height_pt: f32,
}

impl Canvas {
    fn scale(v: f64) -> f32 {
        v as f32 * SUPERSAMPLE * POINTS_PER_PIXEL
    }

    /// Page position in millimetres, origin bottom-left.
    fn position(&self, x: f64, y: f64) -> (Mm, Mm) {
        let x_pt = Self::scale(x);
        let y_pt = self.page_height_pt - Self::scale(y);
        (Mm(x_pt * MM_PER_POINT), Mm(y_pt * MM_PER_POINT))
    }

    fn point(&self, x: f64, y: f64) -> Point {
        let (x, y) = self.position(x, y);
        Point::new(x, y)
    }

    fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb, width: f64) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(Self::scale(width));
        self.layer.add_line(Line {
            points: vec![(self.point(x1, y1), false), (self.point(x2, y2), false)],
            is_closed: false,
        });
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                (self.point(x, y), false),
                (self.point(x + width, y), false),
                (self.point(x + width, y + height), false),
                (self.point(x, y + height), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn outline_rect(&self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.line(x, y, x + width, y, color, 1.0);
        self.line(x + width, y, x + width, y + height, color, 1.0);
        self.line(x + width, y + height, x, y + height, color, 1.0);
        self.line(x, y + height, x, y, color, 1.0);
    }

    fn text(&self, x: f64, y: f64, size: f32, text: &str, color: Rgb, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        let (x, y) = self.position(x, y);
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(
            builtin_font_text(text),
            size * SUPERSAMPLE * POINTS_PER_PIXEL,
            x,
            y,
            font,
        );
    }
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(PdfRgb::new(r, g, b, None))
}

/// The built-in PDF fonts only cover Latin-1; anything else is replaced.
fn builtin_font_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            c if (c as u32) < 0x100 && !c.is_control() => c,
            _ => '?',
        })
        .collect()
}

fn draw_sheet(canvas: &Canvas, placed: &PlacedSheet) {
    let sheet = &placed.sheet;
    let left = placed.left;

    canvas.text(left, placed.top + 20.0, HEADING_SIZE, &sheet.heading, INK, true);

    // Summary table: headings row over values row.
    let top = placed.summary_top();
    let row = (SUMMARY_HEIGHT - 4.0) / 2.0;
    let col = GRID_WIDTH / sheet.summary.len().max(1) as f64;
    canvas.fill_rect(left, top, GRID_WIDTH, row, TABLE_HEADER_FILL);
    canvas.outline_rect(left, top, GRID_WIDTH, row * 2.0, BORDER);
    canvas.line(left, top + row, left + GRID_WIDTH, top + row, BORDER, 1.0);
    for (i, cell) in sheet.summary.iter().enumerate() {
        let x = left + col * i as f64;
        if i > 0 {
            canvas.line(x, top, x, top + row * 2.0, BORDER, 1.0);
        }
        canvas.text(x + 6.0, top + row - 7.0, TABLE_TEXT_SIZE, cell.heading, INK, true);
        canvas.text(x + 6.0, top + row * 2.0 - 7.0, TABLE_TEXT_SIZE, &cell.value, INK, false);
    }

    draw_grid(canvas, &sheet.grid, left, placed.grid_top());

    // Legend chips.
    let legend_y = placed.legend_top() + 5.0;
    canvas.text(left, legend_y + 13.0, LEGEND_TEXT_SIZE, "Legend:", INK, true);
    for (i, entry) in sheet.legend.iter().enumerate() {
        let x = left + 60.0 + i as f64 * (LEGEND_CHIP_WIDTH + 6.0);
        canvas.fill_rect(x, legend_y, LEGEND_CHIP_WIDTH, LEGEND_CHIP_HEIGHT, entry.color);
        canvas.text(x + 6.0, legend_y + 13.0, LEGEND_TEXT_SIZE, &entry.label, INK, true);
    }

    for (i, line) in sheet.segments.iter().enumerate() {
        let y = placed.segments_top() + SEGMENT_LINE_HEIGHT * (i + 1) as f64 - 5.0;
        canvas.text(left, y, SEGMENT_TEXT_SIZE, &format!("{}:", line.status), INK, true);
        canvas.text(
            left + SEGMENT_DETAIL_OFFSET,
            y,
            SEGMENT_TEXT_SIZE,
            &line.detail(),
            INK,
            false,
        );
    }
}

fn draw_grid(canvas: &Canvas, grid: &RenderModel, left: f64, top: f64) {
    canvas.fill_rect(left, top, grid.width, grid.height, WHITE);
    canvas.outline_rect(left, top, grid.width, grid.height, BORDER);

    let draw_line = |line: &GridLine| {
        canvas.line(
            left + line.x1,
            top + line.y1,
            left + line.x2,
            top + line.y2,
            line.color,
            line.stroke_width,
        )
    };
    let draw_label = |label: &TextLabel| {
        canvas.text(
            left + label.x,
            top + label.y,
            label.size as f32,
            &label.text,
            label.color,
            false,
        )
    };

    grid.lines.iter().for_each(draw_line);
    for bar in &grid.bars {
        canvas.fill_rect(
            left + bar.x,
            top + bar.y,
            bar.width,
            bar.height,
            bar.fill.over_white(bar.opacity),
        );
        draw_label(&bar.label);
    }
    grid.row_labels.iter().for_each(draw_label);
    grid.hour_labels.iter().for_each(draw_label);
}
