//! Mock planner for development without a planning backend.
//!
//! Loads one trip plan from a JSON file in the planner's wire format and
//! answers every request with it.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::domain::TripPlanResult;

use super::client::parse_plan;
use super::error::PlannerError;
use super::types::PlanTripRequest;

/// Planner that serves a fixed plan loaded from disk.
#[derive(Debug, Clone)]
pub struct MockPlanner {
    plan: Arc<TripPlanResult>,
}

impl MockPlanner {
    /// Load the plan from `path`. The file goes through the same parsing
    /// and validation as a live response.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, PlannerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PlannerError::Fixture(format!("failed to read {path:?}: {e}")))?;

        let plan = parse_plan(&json)
            .map_err(|e| PlannerError::Fixture(format!("failed to parse {path:?}: {e}")))?;

        Ok(Self {
            plan: Arc::new(plan),
        })
    }

    /// Answer a trip request. Request fields are ignored.
    pub async fn plan_trip(&self, request: &PlanTripRequest) -> Result<TripPlanResult, PlannerError> {
        debug!(
            from = %request.current_location,
            to = %request.dropoff_location,
            "serving mock trip plan"
        );
        Ok(self.plan.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DutyStatus, StopKind};
    use std::io::Write;

    fn request() -> PlanTripRequest {
        PlanTripRequest {
            current_location: "Chicago, IL".into(),
            pickup_location: "Omaha, NE".into(),
            dropoff_location: "Denver, CO".into(),
            current_cycle_hours: 10.0,
        }
    }

    #[tokio::test]
    async fn load_mock_plan() {
        let planner = MockPlanner::new("data/mock_plan.json").unwrap();
        let plan = planner.plan_trip(&request()).await.unwrap();

        assert!(plan.route.len() > 2);
        assert!(plan.stops.iter().any(|s| s.kind == StopKind::Rest));

        let day = &plan.eld_logs[0];
        assert_eq!(day.date, "2025-06-02");
        assert_eq!(day.segments.len(), 6);
        assert_eq!(day.segments[2].status, DutyStatus::Break);
        assert_eq!(day.summary.miles_driven.as_deref(), Some("410"));
    }

    #[tokio::test]
    async fn every_request_gets_the_same_plan() {
        let planner = MockPlanner::new("data/mock_plan.json").unwrap();
        let a = planner.plan_trip(&request()).await.unwrap();
        let mut other = request();
        other.dropoff_location = "Reno, NV".into();
        let b = planner.plan_trip(&other).await.unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_file_is_fixture_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MockPlanner::new(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PlannerError::Fixture(_)));
    }

    #[test]
    fn invalid_fixture_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"route": [{{"lat": 120, "lng": 0}}]}}"#).unwrap();

        let err = MockPlanner::new(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid trip plan"));
    }
}
