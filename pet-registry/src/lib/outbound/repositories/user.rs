use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    admin: bool,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            password_hash: row.password_hash,
            role: Role::from_admin_flag(row.admin),
        })
    }
}

fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserError> {
    rows.into_iter().map(User::try_from).collect()
}

fn write_error(e: sqlx::Error, username: &Username) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserError::UsernameAlreadyExists(username.to_string());
        }
    }
    tracing::error!("User write failed: {}", e);
    UserError::DatabaseError(e.to_string())
}

fn read_error(e: sqlx::Error) -> UserError {
    tracing::error!("User query failed: {}", e);
    UserError::DatabaseError(e.to_string())
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, admin)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, admin
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.role.is_admin())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, password_hash, admin FROM users WHERE id = $1"#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, password_hash, admin FROM users WHERE username = $1"#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        let ids: Vec<i64> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, admin
            FROM users
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        into_users(rows)
    }

    async fn find_by_usernames(&self, usernames: &[Username]) -> Result<Vec<User>, UserError> {
        let usernames: Vec<String> = usernames.iter().map(Username::to_string).collect();

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, admin
            FROM users
            WHERE username = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&usernames)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        into_users(rows)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, username, password_hash, admin FROM users ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        into_users(rows)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3, admin = $4
            WHERE id = $1
            RETURNING id, username, password_hash, admin
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.role.is_admin())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username))?
        .ok_or(UserError::NotFound(user.id.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserError> {
        let mut tx = self.pool.begin().await.map_err(read_error)?;

        let pets = sqlx::query(r#"DELETE FROM pets WHERE user_id = $1"#)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(read_error)?;

        let users = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(read_error)?;

        // Dropping the transaction rolls back the pet delete.
        if users.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        tx.commit().await.map_err(read_error)?;
        Ok(pets.rows_affected())
    }

    async fn exists_admin(&self) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS (SELECT 1 FROM users WHERE admin)"#)
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)
    }
}
