//! Data transfer objects for JSON responses.

use serde::Serialize;

use crate::cache::PlanId;
use crate::domain::TripPlanResult;
use crate::export::EXPORT_FILE_NAME;

/// Response to a successful planning request.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse<'a> {
    pub plan_id: PlanId,
    /// Where the log sheets of this plan can be downloaded.
    pub export_url: String,
    pub plan: &'a TripPlanResult,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Export route for a stored plan.
pub fn export_url(id: PlanId) -> String {
    format!("/trip/{id}/{EXPORT_FILE_NAME}")
}
