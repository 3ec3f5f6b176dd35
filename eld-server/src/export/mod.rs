//! Log-sheet export.
//!
//! Exports are CPU-bound and produce one large document, so they run on the
//! blocking pool behind [`ExportGate`], which lets a single export run at a
//! time. Further requests wait their turn instead of starting in parallel.

mod error;
mod pdf;

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

pub use error::ExportError;
pub use pdf::{
    EXPORT_FILE_NAME, MAX_PAGE_POINTS, POINTS_PER_PIXEL, PdfExport, SUPERSAMPLE, export_pdf,
    page_size_pt,
};

/// Serializes exports: at most one runs at any time.
#[derive(Debug, Clone)]
pub struct ExportGate {
    permits: Arc<Semaphore>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Whether an export is currently in progress.
    pub fn is_busy(&self) -> bool {
        self.permits.available_permits() == 0
    }

    /// Run `job` on the blocking pool once no other export is running.
    pub async fn run<F, T>(&self, job: F) -> Result<T, ExportError>
    where
        F: FnOnce() -> Result<T, ExportError> + Send + 'static,
        T: Send + 'static,
    {
        if self.is_busy() {
            debug!("export already in progress, waiting");
        }
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ExportError::Closed)?;

        tokio::task::spawn_blocking(job)
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }
}

impl Default for ExportGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn exports_never_overlap() {
        let gate = ExportGate::new();
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for i in 0..4 {
            let gate = gate.clone();
            let running = running.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(async move {
                gate.run(move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(i)
                })
                .await
            }));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap().unwrap());
        }
        results.sort();

        assert_eq!(results, vec![0, 1, 2, 3]);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn job_errors_pass_through() {
        let gate = ExportGate::new();
        let err = gate
            .run(|| -> Result<(), ExportError> { Err(ExportError::Pdf("boom".into())) })
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Pdf(msg) if msg == "boom"));
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn panicking_job_is_reported() {
        let gate = ExportGate::new();
        let err = gate
            .run(|| -> Result<(), ExportError> { panic!("renderer crashed") })
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Task(_)));
        assert!(!gate.is_busy());
    }
}
