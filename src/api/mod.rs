//! HTTP API module for the Salary Engine.
//!
//! This module provides the REST API endpoints for computing net pay from
//! gross pay and gross pay from net pay.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{GrossRequest, NetRequest};
pub use response::{ApiError, CalculationResponse, Direction, ScheduleResponse};
pub use state::AppState;
