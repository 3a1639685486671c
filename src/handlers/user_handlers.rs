use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{instrument, debug, info};

use super::ensure_valid_ids;
use crate::db::DbPool;
use crate::dto::CreateUserDto;
use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::models::User;
use crate::repo;

/// Handler for creating a new user
///
/// This function handles POST requests to `/users`.
///
/// ### Returns
///
/// `201 Created` with the new user as JSON
#[instrument(skip(pool, payload))]
pub async fn create_user_handler(
    State(pool): State<Arc<DbPool>>,
    JsonBody(payload): JsonBody<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = repo::create_user(&pool, payload.signup_coin, payload.coins_per_minute).await
        .map_err(ApiError::Database)?;

    info!("Created user with id: {}", user.get_id());

    Ok((StatusCode::CREATED, Json(user)))
}


/// Handler for retrieving a user
///
/// This function handles GET requests to `/users/{id}`.
#[instrument(skip(pool), fields(user_id = %id))]
pub async fn get_user_handler(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    ensure_valid_ids(&[id.as_str()])?;

    let user = repo::get_user(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("User not found"))?;

    debug!("User has balance {}", user.get_signup_coin());

    Ok(Json(user))
}
