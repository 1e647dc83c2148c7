use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::parse_id;
use super::UserData;
use crate::domain::user::models::Password;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for an admin updating a user (raw JSON)
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub admin: Option<bool>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        let username = self.username.map(Username::new).transpose()?;
        let password = self.password.map(Password::new).transpose()?;

        Ok(UpdateUserCommand {
            username,
            password,
            role: self.admin.map(Role::from_admin_flag),
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId(parse_id(&id, "user")?);
    let Json(req) = payload?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
