use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::authentication::models::SignupCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, UserError> {
        Ok(SignupCommand {
            username: Username::new(self.username)?,
            password: Password::new(self.password)?,
        })
    }
}

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command()?;

    state
        .auth_service
        .signup(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
