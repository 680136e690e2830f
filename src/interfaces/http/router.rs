//! API Router with OpenAPI document

use std::sync::Arc;

use axum::{middleware, routing::get, routing::post, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::middleware::{basic_auth_middleware, require_role, AuthState};
use super::modules::health::{self, HealthResponse, HealthState};
use super::modules::request_id::request_id_middleware;
use super::modules::users::{
    self, CreateUserRequest, CreateUserResponse, FindUserResponse, UserHandlerState,
};
use super::ErrorBody;
use crate::auth::Role;
use crate::domain::UserOperations;

/// Everything the router needs from the runtime.
#[derive(Clone)]
pub struct ApiState {
    pub users: Arc<dyn UserOperations>,
    pub auth: AuthState,
    pub docs_enabled: bool,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("HTTP Basic credentials"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::create_user,
        users::find_user_by_id,
    ),
    components(
        schemas(
            CreateUserRequest,
            CreateUserResponse,
            FindUserResponse,
            ErrorBody,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe, no authentication."),
        (name = "Users", description = "Create users (admin role) and look them up by id (user role). All failures return `{\"message\": \"...\"}`."),
    ),
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "REST API for managing users, protected by HTTP Basic authentication.",
        license(name = "Apache-2.0")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let user_routes = Router::new()
        .route(
            "/users",
            post(users::create_user)
                .route_layer(middleware::from_fn_with_state(Role::Admin, require_role)),
        )
        .route(
            "/users/{id}",
            get(users::find_user_by_id)
                .route_layer(middleware::from_fn_with_state(Role::User, require_role)),
        )
        // authentication wraps the role guards
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            basic_auth_middleware,
        ))
        .with_state(UserHandlerState { users: state.users });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new());

    let mut router = Router::new().merge(user_routes).merge(health_routes);

    if state.docs_enabled {
        router = router.route("/api-doc/openapi.json", get(openapi_json));
    }

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
