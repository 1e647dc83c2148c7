use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::Principal;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Change the caller's own password.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = payload?;
    let command = ChangePasswordCommand::new(body.new_password, body.confirm_new_password)
        .map_err(UserError::from)?;

    state
        .user_service
        .change_password(&principal.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
