//! Web layer for the trip planner and log viewer.
//!
//! Serves the trip form, forwards plans to the planning backend, and
//! renders or exports the resulting daily logs.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
