use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_id;
use super::ApiError;
use crate::domain::pet::models::PetId;
use crate::domain::user::models::Principal;
use crate::inbound::http::router::AppState;

pub async fn delete_pet(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(pet_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let pet_id = PetId(parse_id(&pet_id, "pet")?);

    state.pet_service.delete_pet(&principal, &pet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
