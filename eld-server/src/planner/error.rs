//! Planner error types.

use std::fmt;

use super::convert::ConversionError;

/// Errors from talking to the planning service.
#[derive(Debug)]
pub enum PlannerError {
    /// The request never got an answer (connect failure, timeout, etc.)
    Http(reqwest::Error),

    /// The planner refused the trip and said why.
    Rejected { status: u16, message: String },

    /// The planner failed without a usable explanation.
    ApiError { status: u16, body: String },

    /// The response body was not the expected JSON.
    Json {
        message: String,
        body: Option<String>,
    },

    /// The response parsed but failed validation.
    InvalidPlan(ConversionError),

    /// The mock plan fixture could not be loaded.
    Fixture(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Http(e) => write!(f, "HTTP error: {e}"),
            PlannerError::Rejected { message, .. } => write!(f, "{message}"),
            PlannerError::ApiError { status, body } => {
                write!(f, "planner error {status}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            }
            PlannerError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            PlannerError::InvalidPlan(e) => write!(f, "invalid trip plan: {e}"),
            PlannerError::Fixture(msg) => write!(f, "mock plan unavailable: {msg}"),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Http(e) => Some(e),
            PlannerError::InvalidPlan(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::Http(err)
    }
}

impl From<ConversionError> for PlannerError {
    fn from(err: ConversionError) -> Self {
        PlannerError::InvalidPlan(err)
    }
}

/// A trip request that fails local checks and is never sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("{0} must not be empty")]
    EmptyLocation(&'static str),

    #[error("current_cycle_hours must be between 0 and 70, got {0}")]
    CycleHoursOutOfRange(f64),
}
