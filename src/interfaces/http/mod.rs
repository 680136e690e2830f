//! HTTP REST API interfaces
//!
//! - `middleware`: Basic authentication gate and role guard
//! - `error`: failure → status / `{"message"}` mapping
//! - `common`: shared extractors
//! - `modules`: route handlers grouped by resource
//! - `router`: API router and OpenAPI document

pub mod common;
pub mod error;
pub mod middleware;
pub mod modules;
pub mod router;

pub use error::{ApiError, ErrorBody};
pub use router::{create_api_router, ApiDoc, ApiState};
