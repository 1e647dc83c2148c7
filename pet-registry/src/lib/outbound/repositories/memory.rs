//! Process-local repositories.
//!
//! Used by the integration tests and handy for running the service without a
//! database. Ids are assigned from a per-table sequence starting at 1.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::pet::errors::PetError;
use crate::domain::pet::models::NewPet;
use crate::domain::pet::models::Pet;
use crate::domain::pet::models::PetId;
use crate::domain::pet::ports::PetRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Users, with a handle on the pet table so deletes can cascade.
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
    pets: Arc<InMemoryPetRepository>,
}

impl InMemoryUserRepository {
    pub fn new(pets: Arc<InMemoryPetRepository>) -> Self {
        Self {
            table: RwLock::default(),
            pets,
        }
    }
}

fn username_taken(table: &Table<User>, username: &Username, except: Option<UserId>) -> bool {
    table
        .rows
        .values()
        .any(|user| &user.username == username && Some(user.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut table = self.table.write().await;
        if username_taken(&table, &user.username, None) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        let created = User {
            id: UserId(table.next_id()),
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
        };
        table.rows.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.table.read().await.rows.get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn find_by_usernames(&self, usernames: &[Username]) -> Result<Vec<User>, UserError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|user| usernames.contains(&user.username))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if username_taken(&table, &user.username, Some(user.id)) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        table.rows.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserError> {
        // The user lock is held across the pet cleanup.
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id.0) {
            return Err(UserError::NotFound(id.to_string()));
        }

        let removed = self.pets.remove_owned_by(id).await;
        table.rows.remove(&id.0);
        Ok(removed)
    }

    async fn exists_admin(&self) -> Result<bool, UserError> {
        let table = self.table.read().await;
        Ok(table.rows.values().any(|user| user.role.is_admin()))
    }
}

#[derive(Default)]
pub struct InMemoryPetRepository {
    table: RwLock<Table<Pet>>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn remove_owned_by(&self, owner: &UserId) -> u64 {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, pet| pet.owner_id != *owner);
        (before - table.rows.len()) as u64
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn create(&self, pet: NewPet) -> Result<Pet, PetError> {
        let mut table = self.table.write().await;
        let NewPet { details, owner_id } = pet;

        let created = Pet {
            id: PetId(table.next_id()),
            species: details.species,
            breed: details.breed,
            name: details.name,
            birth_date: details.birth_date,
            owner_id,
        };
        table.rows.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetError> {
        Ok(self.table.read().await.rows.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Pet>, PetError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, pet: Pet) -> Result<Pet, PetError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&pet.id.0) {
            Some(stored) => {
                *stored = pet.clone();
                Ok(pet)
            }
            None => Err(PetError::NotFound(pet.id.to_string())),
        }
    }

    async fn delete(&self, id: &PetId) -> Result<(), PetError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(PetError::NotFound(id.to_string()))
    }
}
