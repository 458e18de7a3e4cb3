//! HTTP API module for the salary engine.
//!
//! This module provides the REST API endpoints through which form and
//! export layers request salary calculations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
