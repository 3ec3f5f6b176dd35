//! Export error types.

/// Errors that can occur while producing the log-sheet document.
///
/// Any of these aborts the export as a whole; no partial document is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The page would exceed the largest size PDF viewers accept.
    #[error("log book too large to export: {width_pt:.0}x{height_pt:.0} pt exceeds {max_pt:.0} pt")]
    SurfaceTooLarge {
        width_pt: f32,
        height_pt: f32,
        max_pt: f32,
    },

    /// The PDF writer failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// The background export task panicked or was cancelled.
    #[error("export task failed: {0}")]
    Task(String),

    /// The export gate was shut down.
    #[error("export queue closed")]
    Closed,
}
