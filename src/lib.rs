//! # User Service
//!
//! Small REST service exposing user creation and lookup behind HTTP Basic
//! authentication with role-based access.
//!
//! ## Architecture
//!
//! - **shared**: error taxonomy and shutdown coordination
//! - **domain**: user value types and the `UserOperations` port
//! - **application**: the user operations themselves
//! - **auth**: Basic credential decoding, password hashing, roles
//! - **interfaces**: axum router, middleware and handlers
//! - **server**: runtime lifecycle (bind, serve, graceful shutdown)

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use interfaces::http::create_api_router;

pub use shared::{DomainError, DomainResult};
