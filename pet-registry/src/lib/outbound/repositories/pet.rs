use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::pet::errors::PetError;
use crate::domain::pet::models::BirthDate;
use crate::domain::pet::models::Breed;
use crate::domain::pet::models::NewPet;
use crate::domain::pet::models::Pet;
use crate::domain::pet::models::PetId;
use crate::domain::pet::models::PetName;
use crate::domain::pet::models::Species;
use crate::domain::pet::ports::PetRepository;
use crate::domain::user::models::UserId;

#[derive(Debug, sqlx::FromRow)]
struct PetRow {
    id: i64,
    species: String,
    breed: String,
    name: String,
    birth_date: NaiveDate,
    user_id: i64,
}

impl TryFrom<PetRow> for Pet {
    type Error = PetError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        Ok(Pet {
            id: PetId(row.id),
            species: row.species.parse::<Species>()?,
            breed: Breed::new(row.breed)?,
            name: PetName::new(row.name)?,
            birth_date: BirthDate::from_stored(row.birth_date),
            owner_id: UserId(row.user_id),
        })
    }
}

fn db_error(e: sqlx::Error) -> PetError {
    tracing::error!("Pet query failed: {}", e);
    PetError::DatabaseError(e.to_string())
}

pub struct PostgresPetRepository {
    pool: PgPool,
}

impl PostgresPetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PostgresPetRepository {
    async fn create(&self, pet: NewPet) -> Result<Pet, PetError> {
        let row = sqlx::query_as::<_, PetRow>(
            r#"
            INSERT INTO pets (species, breed, name, birth_date, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, species, breed, name, birth_date, user_id
            "#,
        )
        .bind(pet.details.species.as_str())
        .bind(pet.details.breed.as_str())
        .bind(pet.details.name.as_str())
        .bind(pet.details.birth_date.date())
        .bind(pet.owner_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetError> {
        sqlx::query_as::<_, PetRow>(
            r#"SELECT id, species, breed, name, birth_date, user_id FROM pets WHERE id = $1"#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Pet::try_from)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Pet>, PetError> {
        sqlx::query_as::<_, PetRow>(
            r#"SELECT id, species, breed, name, birth_date, user_id FROM pets ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(Pet::try_from)
        .collect()
    }

    async fn update(&self, pet: Pet) -> Result<Pet, PetError> {
        let row = sqlx::query_as::<_, PetRow>(
            r#"
            UPDATE pets
            SET species = $2, breed = $3, name = $4, birth_date = $5
            WHERE id = $1
            RETURNING id, species, breed, name, birth_date, user_id
            "#,
        )
        .bind(pet.id.0)
        .bind(pet.species.as_str())
        .bind(pet.breed.as_str())
        .bind(pet.name.as_str())
        .bind(pet.birth_date.date())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(PetError::NotFound(pet.id.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: &PetId) -> Result<(), PetError> {
        let result = sqlx::query(r#"DELETE FROM pets WHERE id = $1"#)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(PetError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
