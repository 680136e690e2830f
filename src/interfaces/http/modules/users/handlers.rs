//! User API handlers
//!
//! Thin wrappers over [`UserOperations`]: decode, validate, call, map.
//! Authentication and role checks happen in middleware before these run.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};
use tracing::info;

use super::dto::{CreateUserRequest, CreateUserResponse, FindUserResponse};
use crate::auth::Principal;
use crate::domain::{NewUser, UserOperations};
use crate::interfaces::http::common::ValidatedJson;
use crate::interfaces::http::{ApiError, ErrorBody};
use crate::shared::DomainError;

pub const INVALID_USER_ID_MESSAGE: &str = "Invalid user id";

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub users: Arc<dyn UserOperations>,
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("basic_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Missing or bad credentials", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let new_user = NewUser::try_from(request)?;
    let created = state.users.create(new_user)?;

    info!(
        by = %principal.username,
        user_id = created.user_id,
        username = %created.username,
        "User created"
    );

    Ok(Json(CreateUserResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "User ID (must be positive)")),
    responses(
        (status = 200, description = "User details", body = FindUserResponse),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 401, description = "Missing or bad credentials", body = ErrorBody),
        (status = 403, description = "User role required", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 422, description = "Invalid user id", body = ErrorBody)
    )
)]
pub async fn find_user_by_id(
    State(state): State<UserHandlerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<FindUserResponse>, ApiError> {
    let Path(id) = id.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if id <= 0 {
        return Err(DomainError::InvalidInput(INVALID_USER_ID_MESSAGE.to_string()).into());
    }

    let profile = state.users.find_by_id(id)?;
    Ok(Json(FindUserResponse::from(profile)))
}
