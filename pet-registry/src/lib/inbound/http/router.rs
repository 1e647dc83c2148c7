use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::create_pet::create_pet;
use super::handlers::delete_pet::delete_pet;
use super::handlers::delete_user::delete_user;
use super::handlers::get_pet::get_pet;
use super::handlers::get_user::get_user;
use super::handlers::get_user::get_user_by_username;
use super::handlers::get_users::get_users_by_ids;
use super::handlers::get_users::get_users_by_usernames;
use super::handlers::get_users::list_users;
use super::handlers::home::home;
use super::handlers::list_pets::list_pets;
use super::handlers::login::login;
use super::handlers::signup::signup;
use super::handlers::update_pet::update_pet;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_admin;
use super::middleware::require_authenticated;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::pet::ports::PetServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub pet_service: Arc<dyn PetServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    pet_service: Arc<dyn PetServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        pet_service,
    };

    let public_routes = Router::new()
        .route("/", get(home))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login));

    let user_routes = Router::new()
        .route("/api/pet", post(create_pet))
        .route("/api/pet/all", get(list_pets))
        .route(
            "/api/pet/:pet_id",
            get(get_pet).put(update_pet).delete(delete_pet),
        )
        .route("/api/users/id/:user_id", get(get_user))
        .route("/api/users/ids", get(get_users_by_ids))
        .route("/api/users/usernames", get(get_users_by_usernames))
        .route("/api/users/usernames/:username", get(get_user_by_username))
        .route("/api/users/all", get(list_users))
        .route("/api/users/password", put(change_password))
        .route_layer(middleware::from_fn(require_authenticated));

    let admin_routes = Router::new()
        .route(
            "/api/users/id/:user_id",
            put(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn(require_admin));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
