//! HTTP API surface

pub mod models;
pub mod routes;

pub use models::{error_codes, ApiError};
pub use routes::build_router;
