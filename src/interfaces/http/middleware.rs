//! Authentication middleware for Axum
//!
//! `basic_auth_middleware` resolves the `Authorization: Basic` header to a
//! [`Principal`] stored in request extensions. `require_role` runs per
//! route after it and rejects principals without the route's role.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::auth::{decode_basic_header, AuthError, CredentialStore, Principal, Role};
use crate::interfaces::http::ApiError;

/// Authentication state: the credential store and the advertised realm
#[derive(Clone)]
pub struct AuthState {
    pub credentials: Arc<CredentialStore>,
    pub realm: Arc<str>,
}

impl AuthState {
    pub fn new(credentials: CredentialStore, realm: impl Into<Arc<str>>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            realm: realm.into(),
        }
    }

    fn unauthorized(&self, error: AuthError) -> Response {
        ApiError::Unauthorized {
            error,
            realm: self.realm.to_string(),
        }
        .into_response()
    }
}

/// HTTP Basic authentication middleware - requires valid credentials
pub async fn basic_auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_state.unauthorized(AuthError::MissingCredentials);
    };

    let credentials = match decode_basic_header(auth_header) {
        Ok(credentials) => credentials,
        Err(e) => return auth_state.unauthorized(e),
    };

    // bcrypt is CPU bound; keep it off the async workers
    let store = Arc::clone(&auth_state.credentials);
    let outcome =
        tokio::task::spawn_blocking(move || store.authenticate(&credentials)).await;

    match outcome {
        Ok(Ok(principal)) => {
            debug!(username = %principal.username, "Authenticated");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Ok(Err(e)) => auth_state.unauthorized(e),
        Err(e) => {
            error!("Credential check task failed: {}", e);
            ApiError::Internal("Authentication failed".into()).into_response()
        }
    }
}

/// Role guard - must be layered inside `basic_auth_middleware`.
///
/// The required role is the middleware state, so each route picks its own:
/// `post(handler).route_layer(from_fn_with_state(Role::Admin, require_role))`.
/// A request reaching the guard without a [`Principal`] means the auth
/// layer is missing, which is a server fault.
pub async fn require_role(
    State(role): State<Role>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match request.extensions().get::<Principal>() {
        Some(principal) if principal.has_role(role) => next.run(request).await,
        Some(principal) => {
            debug!(username = %principal.username, required = %role, "Role missing");
            ApiError::Forbidden(AuthError::InsufficientRole).into_response()
        }
        None => {
            error!(required = %role, "Role guard reached without an authenticated principal");
            ApiError::Internal("Authentication is not configured for this route".into())
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    async fn send(app: Router, req: Request<Body>) -> Response {
        use tower::Service;
        let mut svc = app.into_service();
        svc.call(req).await.unwrap()
    }

    fn guarded(role: Role) -> Router {
        Router::new().route(
            "/",
            get(|| async { "ok" })
                .route_layer(axum::middleware::from_fn_with_state(role, require_role)),
        )
    }

    fn request_as(principal: Option<Principal>) -> Request<Body> {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        if let Some(principal) = principal {
            req.extensions_mut().insert(principal);
        }
        req
    }

    #[tokio::test]
    async fn guard_without_auth_layer_is_a_server_error() {
        let resp = send(guarded(Role::User), request_as(None)).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_ne!(
            body["message"],
            AuthError::MissingCredentials.to_string().as_str()
        );
    }

    #[tokio::test]
    async fn guard_checks_principal_roles() {
        let user = Principal {
            username: "user".into(),
            roles: vec![Role::User],
        };

        let resp = send(guarded(Role::Admin), request_as(Some(user.clone()))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = send(guarded(Role::User), request_as(Some(user))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
