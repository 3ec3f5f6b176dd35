//! Planning service HTTP client.
//!
//! Sends trip requests to the planning backend and converts its answers
//! into validated domain types.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::domain::TripPlanResult;

use super::convert::convert_trip_plan;
use super::error::PlannerError;
use super::types::{ErrorBody, PlanTripRequest, TripPlanResponse};

/// Default base URL of the planning backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default maximum concurrent requests.
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default request timeout. Planning geocodes and routes, so it is slow.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an unparseable body is kept for the error message.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the planner client.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Base URL of the backend, without the `/api/...` path
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlannerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Planning backend client.
///
/// Uses a semaphore to bound concurrent planning requests.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    http: reqwest::Client,
    plan_url: String,
    semaphore: Arc<Semaphore>,
}

impl PlannerClient {
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            plan_url: plan_url(&config.base_url),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// The endpoint trip requests are posted to.
    pub fn plan_url(&self) -> &str {
        &self.plan_url
    }

    /// Plan a trip.
    ///
    /// The request should already have passed [`PlanTripRequest::validate`].
    pub async fn plan_trip(&self, request: &PlanTripRequest) -> Result<TripPlanResult, PlannerError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| PlannerError::ApiError {
                status: 0,
                body: "semaphore closed".to_string(),
            })?;

        debug!(url = %self.plan_url, "requesting trip plan");

        let response = self.http.post(&self.plan_url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body));
        }

        let body = response.text().await?;
        let plan = parse_plan(&body)?;

        info!(
            days = plan.eld_logs.len(),
            route_points = plan.route.len(),
            stops = plan.stops.len(),
            "trip planned"
        );
        Ok(plan)
    }
}

fn plan_url(base_url: &str) -> String {
    format!("{}/api/plan-trip/", base_url.trim_end_matches('/'))
}

/// Turn a non-success response into the matching error.
///
/// A JSON body with a non-empty `error` field is the planner explaining a
/// refusal; anything else is an unexplained failure.
pub(super) fn classify_failure(status: u16, body: &str) -> PlannerError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    match message {
        Some(message) => PlannerError::Rejected { status, message },
        None => PlannerError::ApiError {
            status,
            body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        },
    }
}

/// Parse and validate a trip-plan body.
pub fn parse_plan(body: &str) -> Result<TripPlanResult, PlannerError> {
    let response: TripPlanResponse =
        serde_json::from_str(body).map_err(|e| PlannerError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })?;

    Ok(convert_trip_plan(&response)?)
}
