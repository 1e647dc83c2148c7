use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_id;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = UserId(parse_id(&user_id, "user")?);

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
