//! HTTP API module for the pay component engine.
//!
//! This module provides the REST endpoints for validating formulas,
//! authoring calculation strategies, listing the component catalogue and
//! computing component runs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ComputeRequest;
pub use response::{ApiError, ComponentListResponse};
pub use state::AppState;
