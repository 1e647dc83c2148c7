use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user management.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `password_hasher` - Hasher applied to replacement passwords
    pub fn new(users: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            users,
            password_hasher,
        }
    }

    async fn existing(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    fn non_empty(mut users: Vec<User>) -> Result<Vec<User>, UserError> {
        if users.is_empty() {
            return Err(UserError::NoneFound);
        }
        users.sort_by_key(|user| user.id);
        Ok(users)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.existing(id).await
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn get_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        Self::non_empty(self.users.find_by_ids(ids).await?)
    }

    async fn get_users_by_usernames(
        &self,
        usernames: &[Username],
    ) -> Result<Vec<User>, UserError> {
        Self::non_empty(self.users.find_by_usernames(usernames).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        Self::non_empty(self.users.list_all().await?)
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.existing(id).await?;

        if let Some(new_username) = command.username {
            if new_username != user.username {
                if let Some(holder) = self.users.find_by_username(&new_username).await? {
                    if holder.id != user.id {
                        return Err(UserError::UsernameAlreadyExists(new_username.to_string()));
                    }
                }
            }
            user.username = new_username;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.password_hasher.hash(new_password.expose())?;
        }

        if let Some(role) = command.role {
            user.role = role;
        }

        let updated = self.users.update(user).await?;
        tracing::info!("Updated user {} ({})", updated.id, updated.role);
        Ok(updated)
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<User, UserError> {
        let mut user = self.existing(id).await?;
        user.password_hash = self.password_hasher.hash(command.new_password.expose())?;
        self.users.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        let user = self.existing(id).await?;

        let removed = self.users.delete(&user.id).await?;
        tracing::info!("Deleted user {} and {} owned pet(s)", user.id, removed);
        Ok(())
    }
}
