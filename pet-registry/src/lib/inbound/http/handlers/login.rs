use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::LoginCommand;
use crate::inbound::http::router::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

impl From<AccessToken> for LoginResponseData {
    fn from(token: AccessToken) -> Self {
        Self {
            token: token.token,
            expires_in: token.expires_in,
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .login(LoginCommand {
            username: body.username,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}
