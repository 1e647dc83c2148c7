use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PetData;
use crate::domain::pet::errors::PetError;
use crate::domain::pet::models::BirthDate;
use crate::domain::pet::models::Breed;
use crate::domain::pet::models::PetDetails;
use crate::domain::pet::models::PetName;
use crate::domain::pet::models::Species;
use crate::domain::user::models::Principal;
use crate::inbound::http::router::AppState;

/// HTTP request body for creating or replacing a pet (raw JSON).
///
/// Any `id` or owner field a client sends is ignored.
#[derive(Debug, Deserialize)]
pub struct PetRequest {
    pub species: String,
    pub breed: String,
    pub name: String,
    pub birthdate: String,
}

impl PetRequest {
    /// Validate against `today` (UTC) so "not in the future" is deterministic.
    pub(crate) fn try_into_details(self, today: NaiveDate) -> Result<PetDetails, PetError> {
        Ok(PetDetails {
            species: self.species.parse::<Species>()?,
            breed: Breed::new(self.breed)?,
            name: PetName::new(self.name)?,
            birth_date: BirthDate::parse(&self.birthdate, today)?,
        })
    }
}

pub async fn create_pet(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<PetRequest>, JsonRejection>,
) -> Result<ApiSuccess<PetData>, ApiError> {
    let Json(body) = payload?;
    let details = body.try_into_details(Utc::now().date_naive())?;

    state
        .pet_service
        .create_pet(&principal, details)
        .await
        .map_err(ApiError::from)
        .map(|ref pet| ApiSuccess::new(StatusCode::CREATED, pet.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pet::errors::BirthDateError;

    fn request(species: &str, birthdate: &str) -> PetRequest {
        PetRequest {
            species: species.to_string(),
            breed: "Labrador".to_string(),
            name: "Rex".to_string(),
            birthdate: birthdate.to_string(),
        }
    }

    #[test]
    fn test_species_is_case_insensitive() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let details = request("dog", "2020-01-01")
            .try_into_details(today)
            .unwrap();
        assert_eq!(details.species, Species::Dog);
    }

    #[test]
    fn test_future_birthdate_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = request("CAT", "2030-01-01").try_into_details(today);
        assert!(matches!(
            result,
            Err(PetError::InvalidBirthDate(BirthDateError::InFuture(_)))
        ));
    }
}
