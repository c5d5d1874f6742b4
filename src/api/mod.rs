//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for login, punching in and out,
//! regularization requests and employee administration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LoginRequest, PunchInRequest, ResolveRequest, SummaryQuery};
pub use response::{ApiError, ApiErrorResponse, ResolutionResponse};
pub use state::AppState;
