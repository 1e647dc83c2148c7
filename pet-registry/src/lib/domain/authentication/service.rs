use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::SignupCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::Principal;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Domain service for signup, login and bearer-token resolution.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    authenticator: Arc<auth::Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, authenticator: Arc<auth::Authenticator>) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    async fn create(
        &self,
        username: Username,
        password: &Password,
        role: Role,
    ) -> Result<User, AuthError> {
        let password_hash = self.authenticator.hash_password(password.expose())?;
        let user = self
            .users
            .create(NewUser {
                username,
                password_hash,
                role,
            })
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError> {
        if self
            .users
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::warn!(username = %command.username, "Signup rejected, username taken");
            return Err(AuthError::DuplicateUser(command.username.to_string()));
        }

        let user = self
            .create(command.username, &command.password, Role::User)
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");
        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError> {
        let Ok(username) = Username::new(command.username) else {
            return Err(self.authenticator.reject(&command.password).into());
        };

        let Some(user) = self.users.find_by_username(&username).await? else {
            tracing::warn!(username = %username, "Login failed");
            return Err(self.authenticator.reject(&command.password).into());
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.username.as_str())
            .map_err(|e| {
                tracing::warn!(username = %user.username, "Login failed");
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(AccessToken {
            token: result.access_token,
            expires_in: self.authenticator.tokens().lifetime().num_seconds(),
        })
    }

    async fn resolve_principal(&self, token: &str) -> Result<Principal, AuthError> {
        let subject = self.authenticator.tokens().extract_subject(token)?;

        let username = Username::new(subject)
            .map_err(|e| AuthError::InvalidToken(format!("bad subject: {}", e)))?;

        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::InvalidToken(format!("unknown subject {}", username)))?;

        if !self
            .authenticator
            .tokens()
            .validate(token, user.username.as_str())
        {
            return Err(AuthError::InvalidToken("subject mismatch".to_string()));
        }

        Ok(Principal::from(&user))
    }

    async fn bootstrap_admin(
        &self,
        username: Username,
        password: Password,
    ) -> Result<bool, AuthError> {
        if self.users.exists_admin().await? {
            tracing::debug!("Admin account present, skipping bootstrap");
            return Ok(false);
        }

        let admin = self.create(username, &password, Role::Admin).await?;
        tracing::info!(user_id = %admin.id, username = %admin.username, "Bootstrapped admin account");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::UserId;

    const SECRET: &str = "dGVzdC1zZWNyZXQta2V5LWZvci1qd3Qtc2lnbmluZy1hdC1sZWFzdC0zMi1ieXRlcw==";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;
            async fn find_by_usernames(&self, usernames: &[Username]) -> Result<Vec<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<u64, UserError>;
            async fn exists_admin(&self) -> Result<bool, UserError>;
        }
    }

    fn authenticator() -> Arc<auth::Authenticator> {
        Arc::new(auth::Authenticator::new(
            auth::PasswordHasher::with_cost(256, 1).unwrap(),
            auth::TokenService::new(
                auth::JwtHandler::from_base64_secret(SECRET).unwrap(),
                Duration::hours(1),
            ),
        )
        .unwrap())
    }

    fn stored_user(authenticator: &auth::Authenticator, username: &str, password: &str) -> User {
        User {
            id: UserId(1),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            role: Role::User,
        }
    }

    fn signup_command(username: &str, password: &str) -> SignupCommand {
        SignupCommand {
            username: Username::new(username.to_string()).unwrap(),
            password: Password::new(password.to_string()).unwrap(),
        }
    }

    fn login_command(username: &str, password: &str) -> LoginCommand {
        LoginCommand {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_creates_regular_user() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_username().times(1).returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|new_user| {
                new_user.username.as_str() == "alice"
                    && new_user.role == Role::User
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: UserId(1),
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    role: new_user.role,
                })
            });

        let service = AuthService::new(Arc::new(users), authenticator());

        let user = service
            .signup(signup_command("alice", "pw1"))
            .await
            .unwrap();
        assert_eq!(user.id, UserId(1));
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_signup_duplicate_user() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "alice", "pw1");

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        users.expect_create().times(0);

        let service = AuthService::new(Arc::new(users), authenticator);

        let result = service.signup(signup_command("alice", "other")).await;
        assert!(matches!(result, Err(AuthError::DuplicateUser(name)) if name == "alice"));
    }

    #[tokio::test]
    async fn test_signup_race_on_unique_constraint() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_username().times(1).returning(|_| Ok(None));
        users.expect_create().times(1).returning(|new_user| {
            Err(UserError::UsernameAlreadyExists(
                new_user.username.to_string(),
            ))
        });

        let service = AuthService::new(Arc::new(users), authenticator());

        let result = service.signup(signup_command("alice", "pw1")).await;
        assert!(matches!(result, Err(AuthError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_username() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "alice", "pw1");

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(users), authenticator.clone());

        let token = service.login(login_command("alice", "pw1")).await.unwrap();
        assert_eq!(token.expires_in, 3600);
        assert_eq!(
            authenticator.tokens().extract_subject(&token.token).unwrap(),
            "alice"
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "alice", "pw1");

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |username| {
                if username.as_str() == "alice" {
                    Ok(Some(existing.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = AuthService::new(Arc::new(users), authenticator);

        for (username, password) in [("alice", "wrong"), ("nobody", "pw1"), ("has space", "pw1")] {
            let err = service
                .login(login_command(username, password))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn test_unknown_username_costs_a_password_check() {
        let authenticator = Arc::new(
            auth::Authenticator::new(
                auth::PasswordHasher::with_cost(4096, 2).unwrap(),
                auth::TokenService::new(
                    auth::JwtHandler::from_base64_secret(SECRET).unwrap(),
                    Duration::hours(1),
                ),
            )
            .unwrap(),
        );
        let existing = stored_user(&authenticator, "alice", "pw1");

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_username().returning(move |username| {
            if username.as_str() == "alice" {
                Ok(Some(existing.clone()))
            } else {
                Ok(None)
            }
        });

        let service = AuthService::new(Arc::new(users), authenticator);

        let fastest = |username: &'static str| {
            let service = &service;
            async move {
                let mut best = std::time::Duration::MAX;
                for _ in 0..3 {
                    let started = std::time::Instant::now();
                    let result = service.login(login_command(username, "wrong")).await;
                    best = best.min(started.elapsed());
                    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
                }
                best
            }
        };

        let wrong_password = fastest("alice").await;
        let unknown_user = fastest("nobody").await;
        let malformed_user = fastest("has space").await;

        assert!(unknown_user * 4 >= wrong_password);
        assert!(malformed_user * 4 >= wrong_password);
    }

    #[tokio::test]
    async fn test_resolve_principal() {
        let authenticator = authenticator();
        let mut existing = stored_user(&authenticator, "root", "pw");
        existing.role = Role::Admin;
        let token = authenticator.tokens().issue("root").unwrap().token;

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_username()
            .withf(|username| username.as_str() == "root")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(users), authenticator);

        let principal = service.resolve_principal(&token).await.unwrap();
        assert_eq!(principal.username.as_str(), "root");
        assert!(principal.is_admin());
    }

    #[tokio::test]
    async fn test_resolve_principal_expired_token() {
        let authenticator = authenticator();
        let token = authenticator
            .tokens()
            .issue_at("alice", Utc::now() - Duration::hours(2))
            .unwrap()
            .token;

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_username().times(0);

        let service = AuthService::new(Arc::new(users), authenticator);

        let result = service.resolve_principal(&token).await;
        assert!(matches!(result, Err(AuthError::ExpiredToken)));
    }

    #[tokio::test]
    async fn test_resolve_principal_deleted_user() {
        let authenticator = authenticator();
        let token = authenticator.tokens().issue("ghost").unwrap().token;

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_username().times(1).returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(users), authenticator);

        let result = service.resolve_principal(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_resolve_principal_garbage() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_username().times(0);

        let service = AuthService::new(Arc::new(users), authenticator());

        let result = service.resolve_principal("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_creates_once() {
        let mut users = MockTestUserRepository::new();
        users.expect_exists_admin().times(1).returning(|| Ok(false));
        users
            .expect_create()
            .withf(|new_user| new_user.role == Role::Admin && new_user.username.as_str() == "root")
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: UserId(1),
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    role: new_user.role,
                })
            });

        let service = AuthService::new(Arc::new(users), authenticator());

        let created = service
            .bootstrap_admin(
                Username::new("root".to_string()).unwrap(),
                Password::new("rootpassword".to_string()).unwrap(),
            )
            .await
            .unwrap();
        assert!(created);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_skips_when_present() {
        let mut users = MockTestUserRepository::new();
        users.expect_exists_admin().times(1).returning(|| Ok(true));
        users.expect_create().times(0);

        let service = AuthService::new(Arc::new(users), authenticator());

        let created = service
            .bootstrap_admin(
                Username::new("root".to_string()).unwrap(),
                Password::new("rootpassword".to_string()).unwrap(),
            )
            .await
            .unwrap();
        assert!(!created);
    }
}
