use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::PetData;
use crate::inbound::http::router::AppState;

pub async fn list_pets(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PetData>>, ApiError> {
    let pets = state.pet_service.list_pets().await?;
    Ok(ApiSuccess::new(
        StatusCode::OK,
        pets.iter().map(PetData::from).collect(),
    ))
}
