//! Failure → HTTP response mapping
//!
//! | Failure                                   | Status |
//! |-------------------------------------------|--------|
//! | `DomainError::NotFound`                   | 404    |
//! | `Validation` / `InvalidInput` / `Persistence` | 422 |
//! | malformed body or path parameter          | 400    |
//! | missing / bad credentials                 | 401    |
//! | missing role                              | 403    |
//!
//! Every body is `{"message": "<text>"}`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::shared::DomainError;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    BadRequest(String),

    /// 401 with a `WWW-Authenticate: Basic realm="..."` challenge
    #[error("{error}")]
    Unauthorized { error: AuthError, realm: String },

    #[error("{0}")]
    Forbidden(AuthError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(
                DomainError::Validation(_)
                | DomainError::InvalidInput(_)
                | DomainError::Persistence(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }

        let challenge = match &self {
            ApiError::Unauthorized { realm, .. } => {
                HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm)).ok()
            }
            _ => None,
        };

        let body = Json(ErrorBody {
            message: self.to_string(),
        });
        let mut response = (status, body).into_response();

        if let Some(value) = challenge {
            response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
        }

        response
    }
}
