use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    pub ids: String,
}

#[derive(Debug, Deserialize)]
pub struct UsernamesQuery {
    pub usernames: String,
}

/// Split a comma separated query value, rejecting empty lists.
fn split_list(raw: &str, what: &str) -> Result<Vec<String>, ApiError> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(ApiError::BadRequest(format!("No {} given", what)));
    }
    Ok(items)
}

fn parse_ids(raw: &str) -> Result<Vec<UserId>, ApiError> {
    split_list(raw, "ids")?
        .into_iter()
        .map(|item| {
            item.parse::<i64>()
                .map(UserId)
                .map_err(|_| ApiError::BadRequest(format!("Invalid user id: {}", item)))
        })
        .collect()
}

fn parse_usernames(raw: &str) -> Result<Vec<Username>, ApiError> {
    split_list(raw, "usernames")?
        .into_iter()
        .map(|item| {
            Username::new(item.clone())
                .map_err(|e| ApiError::BadRequest(format!("Invalid username '{}': {}", item, e)))
        })
        .collect()
}

fn user_list(users: Vec<User>) -> ApiSuccess<Vec<UserData>> {
    ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect())
}

pub async fn get_users_by_ids(
    State(state): State<AppState>,
    query: Result<Query<IdsQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let Query(query) = query?;
    let ids = parse_ids(&query.ids)?;

    let users = state.user_service.get_users_by_ids(&ids).await?;
    Ok(user_list(users))
}

pub async fn get_users_by_usernames(
    State(state): State<AppState>,
    query: Result<Query<UsernamesQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let Query(query) = query?;
    let usernames = parse_usernames(&query.usernames)?;

    let users = state.user_service.get_users_by_usernames(&usernames).await?;
    Ok(user_list(users))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(user_list(users))
}
