//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for monthly payroll,
//! payroll runs and severance.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MonthlyPayrollRequest, PayrollRunRequest, SeveranceRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
