use async_trait::async_trait;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user management operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Retrieve the users matching any of the given identifiers.
    ///
    /// Missing IDs are skipped; the result is ordered by id.
    ///
    /// # Errors
    /// * `NoneFound` - Not a single ID matched
    /// * `DatabaseError` - Database operation failed
    async fn get_users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;

    /// Retrieve the users matching any of the given usernames.
    ///
    /// # Errors
    /// * `NoneFound` - Not a single username matched
    /// * `DatabaseError` - Database operation failed
    async fn get_users_by_usernames(&self, usernames: &[Username])
        -> Result<Vec<User>, UserError>;

    /// Retrieve every user.
    ///
    /// # Errors
    /// * `NoneFound` - The store is empty
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update an existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `Hashing` - New password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Replace a user's password.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Hashing` - New password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<User, UserError>;

    /// Delete a user together with every pet they own.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate (the credential store).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and return it with its assigned id.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve users by identifiers; missing IDs are skipped.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;

    /// Retrieve users by usernames; unknown usernames are skipped.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_usernames(&self, usernames: &[Username]) -> Result<Vec<User>, UserError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Overwrite username, password hash and role of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove a user and every pet they own as one unit of work.
    ///
    /// Either both go or neither does. Returns how many pets were removed.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<u64, UserError>;

    /// Whether at least one user holds the admin role.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_admin(&self) -> Result<bool, UserError>;
}
