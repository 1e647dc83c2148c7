use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Resolves the bearer token, if any, into a [`Principal`] request extension.
///
/// Never rejects a request: a missing or bad token just leaves the request
/// anonymous, and the route-level guards below decide what that means.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(req.headers()).map(str::to_owned) {
        match state.auth_service.resolve_principal(&token).await {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(e) => tracing::debug!("Ignoring bearer token: {}", e),
        }
    }

    next.run(req).await
}

/// Guard for routes open to any authenticated user.
pub async fn require_authenticated(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<Principal>().is_none() {
        return Err(ApiError::authentication_required());
    }
    Ok(next.run(req).await)
}

/// Guard for admin-only routes.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let Some(principal) = req.extensions().get::<Principal>() else {
        return Err(ApiError::authentication_required());
    };

    if !principal.is_admin() {
        tracing::warn!(
            "User {} ({}) denied access to admin route {}",
            principal.username,
            principal.id,
            req.uri().path()
        );
        return Err(ApiError::access_denied());
    }

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
