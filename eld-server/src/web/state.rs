//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::PlanCache;
use crate::domain::StatusStyle;
use crate::export::ExportGate;
use crate::planner::PlanningBackend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Where trip plans come from
    pub planner: Arc<PlanningBackend>,

    /// Plans made so far, for later export
    pub plans: Arc<PlanCache>,

    /// Serializes log-sheet exports
    pub exports: ExportGate,

    /// Row and color lookup used for every rendering
    pub style: StatusStyle,
}

impl AppState {
    pub fn new(planner: PlanningBackend, plans: PlanCache) -> Self {
        Self {
            planner: Arc::new(planner),
            plans: Arc::new(plans),
            exports: ExportGate::new(),
            style: StatusStyle::default(),
        }
    }
}
