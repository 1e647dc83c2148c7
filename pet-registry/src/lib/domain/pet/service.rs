use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pet::errors::PetError;
use crate::domain::pet::models::NewPet;
use crate::domain::pet::models::Pet;
use crate::domain::pet::models::PetDetails;
use crate::domain::pet::models::PetId;
use crate::domain::pet::ports::PetRepository;
use crate::domain::pet::ports::PetServicePort;
use crate::domain::user::models::Principal;

/// Domain service implementation for pet operations.
pub struct PetService<PR>
where
    PR: PetRepository,
{
    repository: Arc<PR>,
}

impl<PR> PetService<PR>
where
    PR: PetRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn existing(&self, id: &PetId) -> Result<Pet, PetError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PetError::NotFound(id.to_string()))
    }

    /// Load a pet and make sure `principal` may change it.
    async fn modifiable(&self, principal: &Principal, id: &PetId) -> Result<Pet, PetError> {
        let pet = self.existing(id).await?;
        if !principal.may_modify(pet.owner_id) {
            tracing::warn!(
                "User {} ({}) denied access to pet {} owned by {}",
                principal.username,
                principal.id,
                pet.id,
                pet.owner_id
            );
            return Err(PetError::Forbidden(id.to_string()));
        }
        Ok(pet)
    }
}

#[async_trait]
impl<PR> PetServicePort for PetService<PR>
where
    PR: PetRepository,
{
    async fn create_pet(
        &self,
        principal: &Principal,
        details: PetDetails,
    ) -> Result<Pet, PetError> {
        let pet = self
            .repository
            .create(NewPet {
                details,
                owner_id: principal.id,
            })
            .await?;

        tracing::info!("User {} registered pet {}", principal.id, pet.id);
        Ok(pet)
    }

    async fn get_pet(&self, id: &PetId) -> Result<Pet, PetError> {
        self.existing(id).await
    }

    async fn list_pets(&self) -> Result<Vec<Pet>, PetError> {
        let mut pets = self.repository.list_all().await?;
        if pets.is_empty() {
            return Err(PetError::NoneFound);
        }
        pets.sort_by_key(|pet| pet.id);
        Ok(pets)
    }

    async fn update_pet(
        &self,
        principal: &Principal,
        id: &PetId,
        details: PetDetails,
    ) -> Result<Pet, PetError> {
        let mut pet = self.modifiable(principal, id).await?;
        pet.apply(details);
        self.repository.update(pet).await
    }

    async fn delete_pet(&self, principal: &Principal, id: &PetId) -> Result<(), PetError> {
        let pet = self.modifiable(principal, id).await?;
        self.repository.delete(&pet.id).await?;
        tracing::info!("User {} deleted pet {}", principal.id, pet.id);
        Ok(())
    }
}
