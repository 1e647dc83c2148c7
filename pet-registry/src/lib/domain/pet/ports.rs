use async_trait::async_trait;

use crate::domain::pet::errors::PetError;
use crate::domain::pet::models::NewPet;
use crate::domain::pet::models::Pet;
use crate::domain::pet::models::PetDetails;
use crate::domain::pet::models::PetId;
use crate::domain::user::models::Principal;

/// Port for pet registry operations.
///
/// Mutations take the acting [`Principal`]; reads are open to any
/// authenticated caller.
#[async_trait]
pub trait PetServicePort: Send + Sync + 'static {
    /// Register a pet owned by `principal`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_pet(&self, principal: &Principal, details: PetDetails)
        -> Result<Pet, PetError>;

    /// # Errors
    /// * `NotFound` - Pet does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_pet(&self, id: &PetId) -> Result<Pet, PetError>;

    /// Retrieve every registered pet, ordered by id.
    ///
    /// # Errors
    /// * `NoneFound` - No pets are registered
    /// * `DatabaseError` - Database operation failed
    async fn list_pets(&self) -> Result<Vec<Pet>, PetError>;

    /// Overwrite the attributes of a pet. The owner never changes.
    ///
    /// # Errors
    /// * `NotFound` - Pet does not exist
    /// * `Forbidden` - Caller neither owns the pet nor is an admin
    /// * `DatabaseError` - Database operation failed
    async fn update_pet(
        &self,
        principal: &Principal,
        id: &PetId,
        details: PetDetails,
    ) -> Result<Pet, PetError>;

    /// # Errors
    /// * `NotFound` - Pet does not exist
    /// * `Forbidden` - Caller neither owns the pet nor is an admin
    /// * `DatabaseError` - Database operation failed
    async fn delete_pet(&self, principal: &Principal, id: &PetId) -> Result<(), PetError>;
}

/// Persistence operations for the pet aggregate.
#[async_trait]
pub trait PetRepository: Send + Sync + 'static {
    /// Persist a new pet and return it with its assigned id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, pet: NewPet) -> Result<Pet, PetError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Pet>, PetError>;

    /// # Errors
    /// * `NotFound` - Pet does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, pet: Pet) -> Result<Pet, PetError>;

    /// # Errors
    /// * `NotFound` - Pet does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &PetId) -> Result<(), PetError>;
}
