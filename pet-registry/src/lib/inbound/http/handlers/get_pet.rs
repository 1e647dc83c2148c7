use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_id;
use super::ApiError;
use super::ApiSuccess;
use super::PetData;
use crate::domain::pet::models::PetId;
use crate::inbound::http::router::AppState;

pub async fn get_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> Result<ApiSuccess<PetData>, ApiError> {
    let pet_id = PetId(parse_id(&pet_id, "pet")?);

    state
        .pet_service
        .get_pet(&pet_id)
        .await
        .map_err(ApiError::from)
        .map(|ref pet| ApiSuccess::new(StatusCode::OK, pet.into()))
}
