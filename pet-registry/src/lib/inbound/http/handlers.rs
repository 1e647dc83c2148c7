use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::authentication::errors::AuthError;
use crate::domain::pet::errors::PetError;
use crate::domain::pet::models::Pet;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod change_password;
pub mod create_pet;
pub mod delete_pet;
pub mod delete_user;
pub mod get_pet;
pub mod get_user;
pub mod get_users;
pub mod home;
pub mod list_pets;
pub mod login;
pub mod signup;
pub mod update_pet;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

const INTERNAL_ERROR: &str = "Internal server error";
const ACCESS_DENIED: &str = "Access denied";
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// Log the cause and hide it from the client.
    fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!("Request failed: {}", cause);
        Self::InternalServerError(INTERNAL_ERROR.to_string())
    }

    pub fn authentication_required() -> Self {
        Self::Unauthorized(AUTHENTICATION_REQUIRED.to_string())
    }

    pub fn access_denied() -> Self {
        Self::Forbidden(ACCESS_DENIED.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::UnprocessableEntity(e.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) | UserError::NoneFound => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Hashing(_) | UserError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<PetError> for ApiError {
    fn from(err: PetError) -> Self {
        match err {
            PetError::NotFound(_) | PetError::NoneFound => {
                ApiError::NotFound("Pet not found".to_string())
            }
            PetError::Forbidden(_) => ApiError::access_denied(),
            PetError::InvalidSpecies(_)
            | PetError::InvalidText(_)
            | PetError::InvalidBirthDate(_) => ApiError::UnprocessableEntity(err.to_string()),
            PetError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateUser(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::InvalidToken(_) | AuthError::ExpiredToken => {
                ApiError::authentication_required()
            }
            AuthError::Validation(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::Hashing(_)
            | AuthError::TokenIssue(_)
            | AuthError::DatabaseError(_)
            | AuthError::Unknown(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user. The password hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub admin: bool,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.to_string(),
            admin: user.role.is_admin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetData {
    pub id: i64,
    pub species: String,
    pub breed: String,
    pub name: String,
    pub birthdate: String,
    pub user_id: i64,
}

impl From<&Pet> for PetData {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.0,
            species: pet.species.to_string(),
            breed: pet.breed.as_str().to_string(),
            name: pet.name.as_str().to_string(),
            birthdate: pet.birth_date.to_string(),
            user_id: pet.owner_id.0,
        }
    }
}

/// Parse a numeric path segment, answering 400 when it is not one.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} id: {}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::errors::UsernameError;

    #[test]
    fn test_internal_errors_are_hidden() {
        let err = ApiError::from(UserError::DatabaseError("password=hunter2".to_string()));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_not_found_messages_are_generic() {
        assert_eq!(
            ApiError::from(PetError::NotFound("42".to_string())),
            ApiError::NotFound("Pet not found".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::NotFoundByUsername("bob".to_string())),
            ApiError::NotFound("User not found".to_string())
        );
    }

    #[test]
    fn test_domain_error_statuses() {
        assert_eq!(
            ApiError::from(PetError::Forbidden("1".to_string())),
            ApiError::Forbidden("Access denied".to_string())
        );
        assert!(matches!(
            ApiError::from(AuthError::DuplicateUser("alice".to_string())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(UserError::InvalidUsername(UsernameError::Empty)),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("17", "pet"), Ok(17));
        assert!(matches!(parse_id("abc", "pet"), Err(ApiError::BadRequest(_))));
    }
}
