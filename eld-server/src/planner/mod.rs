//! Trip planning backend.
//!
//! The planning service geocodes the locations, routes the trip and
//! schedules duty status under the HOS rules. This server only calls it:
//! - `POST /api/plan-trip/` with the four form fields
//! - success returns route, stops and per-day logs
//! - failure returns `{ "error": "..." }` when the planner can explain it

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT, PlannerClient, PlannerConfig, parse_plan};
pub use convert::{ConversionError, convert_trip_plan};
pub use error::{PlannerError, RequestError};
pub use mock::MockPlanner;
pub use types::{MAX_CYCLE_HOURS, NumberOrString, PlanTripRequest, TripPlanResponse};

use crate::domain::TripPlanResult;

/// Where trip plans come from.
#[derive(Debug, Clone)]
pub enum PlanningBackend {
    Remote(PlannerClient),
    Mock(MockPlanner),
}

impl PlanningBackend {
    pub async fn plan_trip(&self, request: &PlanTripRequest) -> Result<TripPlanResult, PlannerError> {
        match self {
            PlanningBackend::Remote(client) => client.plan_trip(request).await,
            PlanningBackend::Mock(mock) => mock.plan_trip(request).await,
        }
    }

    /// Short description for startup logging.
    pub fn describe(&self) -> String {
        match self {
            PlanningBackend::Remote(client) => format!("planner at {}", client.plan_url()),
            PlanningBackend::Mock(_) => "mock planner".to_string(),
        }
    }
}
