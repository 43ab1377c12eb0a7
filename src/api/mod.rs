//! HTTP API module for the Benefit Engine.
//!
//! This module provides the REST API endpoints for the childcare
//! reduced-hours benefit (policy lookup, proration ratio and the full
//! calculation) and for the housing score, unemployment benefit and youth
//! savings calculators.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ChildcareRequest, FormNumber, IncomeItemRequest, PolicyFieldsRequest, PolicyRequest,
    RatioRequest, WageModeRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalculatorResponse, ChildcareResponse, DisplayValues,
    PolicyResponse,
};
pub use state::AppState;
