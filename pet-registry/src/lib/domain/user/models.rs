use std::fmt;

use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// `password_hash` never leaves the domain; transport types copy only the
/// public fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
}

/// User unique identifier type, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Capability tag carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Map the stored admin flag onto a role.
    pub fn from_admin_flag(admin: bool) -> Self {
        if admin {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Username value type
///
/// Non-blank, at most 50 characters, no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty
    /// * `TooLong` - Username longer than 50 characters
    /// * `ContainsWhitespace` - Username contains a whitespace character
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::without_whitespace(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn without_whitespace(username: String) -> Result<String, UsernameError> {
        if username.chars().any(char::is_whitespace) {
            Err(UsernameError::ContainsWhitespace)
        } else {
            Ok(username)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted from a client, before hashing.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password longer than 100 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length == 0 {
            return Err(PasswordPolicyError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// The authenticated identity acting on a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub username: Username,
    pub role: Role,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Owners may change their own resources; admins may change anyone's.
    /// Compared on the numeric id, never on loaded entity identity.
    pub fn may_modify(&self, owner: UserId) -> bool {
        self.id == owner || self.is_admin()
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// A user ready to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub password: Option<Password>,
    pub role: Option<Role>,
}

/// Command for a user changing their own password.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub new_password: Password,
}

impl ChangePasswordCommand {
    /// # Errors
    /// * `ConfirmationMismatch` - The two entries differ
    /// * `Empty` / `TooLong` - New password breaks the policy
    pub fn new(
        new_password: String,
        confirm_new_password: String,
    ) -> Result<Self, PasswordPolicyError> {
        if new_password != confirm_new_password {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }
        Ok(Self {
            new_password: Password::new(new_password)?,
        })
    }
}
