use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_id;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId(parse_id(&user_id, "user")?);

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    // A name that could never have been registered cannot match anyone.
    let username =
        Username::new(username).map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
