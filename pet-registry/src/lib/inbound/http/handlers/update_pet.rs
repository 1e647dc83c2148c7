use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::Utc;

use super::create_pet::PetRequest;
use super::parse_id;
use super::ApiError;
use super::ApiSuccess;
use super::PetData;
use crate::domain::pet::models::PetId;
use crate::domain::user::models::Principal;
use crate::inbound::http::router::AppState;

pub async fn update_pet(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(pet_id): Path<String>,
    payload: Result<Json<PetRequest>, JsonRejection>,
) -> Result<ApiSuccess<PetData>, ApiError> {
    let pet_id = PetId(parse_id(&pet_id, "pet")?);
    let Json(body) = payload?;
    let details = body.try_into_details(Utc::now().date_naive())?;

    state
        .pet_service
        .update_pet(&principal, &pet_id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref pet| ApiSuccess::new(StatusCode::OK, pet.into()))
}
