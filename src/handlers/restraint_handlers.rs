use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{instrument, debug, info, warn};

use super::ensure_valid_ids;
use crate::db::DbPool;
use crate::dto::{CreateRestraintDto, MessageDto, UpdateCoinsPerMinuteDto};
use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::models::UpgradeSet;
use crate::repo;

/// Handler for creating a new restraint
///
/// This function handles POST requests to `/restraints`. The restraint is
/// appended to the first upgrade set, which is created if none exists yet.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The restraint's fields
///
/// ### Returns
///
/// `201 Created` with the saved upgrade set as JSON
#[instrument(skip(pool, payload), fields(name = %payload.name))]
pub async fn create_restraint_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and deserialize the JSON request body
    JsonBody(payload): JsonBody<CreateRestraintDto>,
) -> Result<(StatusCode, Json<UpgradeSet>), ApiError> {
    info!("Creating new restraint");

    let mut upgrade_set = match repo::get_first_upgrade_set(&pool).map_err(ApiError::Database)? {
        Some(upgrade_set) => upgrade_set,
        None => {
            debug!("No upgrade set exists, starting a new one");
            UpgradeSet::new()
        }
    };

    upgrade_set.push_restraint(payload.into_restraint());

    let saved = repo::save_upgrade_set(&pool, &upgrade_set).await
        .map_err(ApiError::Database)?;

    info!("Upgrade set {} now holds {} restraints", saved.get_id(), saved.restraints().len());

    Ok((StatusCode::CREATED, Json(saved)))
}


/// Handler for listing all upgrade sets
///
/// This function handles GET requests to `/restraints`.
///
/// ### Returns
///
/// Every upgrade set with its restraints as JSON
#[instrument(skip(pool))]
pub async fn list_restraints_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<UpgradeSet>>, ApiError> {
    let upgrade_sets = repo::list_upgrade_sets(&pool)
        .map_err(ApiError::Database)?;

    info!("Retrieved {} upgrade sets", upgrade_sets.len());

    Ok(Json(upgrade_sets))
}


/// Handler for adding to a user's coins-per-minute rate
///
/// This function handles PUT requests to `/restraints/coins-per-minute`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The user ID and the amount to add
///
/// ### Returns
///
/// A confirmation message; the updated user is not returned
#[instrument(skip(pool, payload), fields(user_id = ?payload.user_id, coin_min = ?payload.coin_min))]
pub async fn update_coins_per_minute_handler(
    State(pool): State<Arc<DbPool>>,
    JsonBody(payload): JsonBody<UpdateCoinsPerMinuteDto>,
) -> Result<Json<MessageDto>, ApiError> {
    let (Some(user_id), Some(coin_min)) = (payload.user_id.filter(|id| !id.is_empty()), payload.coin_min) else {
        return Err(ApiError::MissingFields("userId and coinMin are required"));
    };
    let coin_min = coin_min.unwrap_or(0.0);

    let user = repo::get_user(&pool, &user_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("User not found"))?;

    let coins_per_minute = user.get_coins_per_minute() + coin_min;

    repo::set_coins_per_minute(&pool, &user_id, coins_per_minute).await
        .map_err(ApiError::Database)?;

    info!("Updated coins per minute to {}", coins_per_minute);

    Ok(Json(MessageDto::new("coinsPerMinute updated successfully")))
}


/// Handler for buying the next level of a restraint
///
/// This function handles PUT requests to
/// `/restraints/{upgrade_set_id}/{restraint_id}`.
///
/// The user charged is the owner of the first restraint in the set that has
/// one, which is not necessarily the owner of the restraint being upgraded.
/// The price charged is the restraint's new per-minute rate; the numeric
/// cost only drives the next cost.
///
/// The user and the upgrade set are saved one after the other; a failure
/// saving the upgrade set does not refund the user.
///
/// ### Returns
///
/// The saved upgrade set as JSON
#[instrument(skip(pool), fields(upgrade_set_id = %upgrade_set_id, restraint_id = %restraint_id))]
pub async fn upgrade_restraint_handler(
    State(pool): State<Arc<DbPool>>,
    // Extract the upgrade set ID and restraint ID from the URL path
    Path((upgrade_set_id, restraint_id)): Path<(String, String)>,
) -> Result<Json<UpgradeSet>, ApiError> {
    ensure_valid_ids(&[upgrade_set_id.as_str(), restraint_id.as_str()])?;

    let mut upgrade_set = repo::get_upgrade_set(&pool, &upgrade_set_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("Upgrade set not found"))?;

    if upgrade_set.restraint(&restraint_id).is_none() {
        return Err(ApiError::NotFound("Restraint item not found"));
    }

    let owner_id = upgrade_set
        .owner_id()
        .map(str::to_string)
        .ok_or(ApiError::NotFound("User ID not found in upgrade set"))?;

    let mut user = repo::get_user(&pool, &owner_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound("User not found"))?;

    let restraint = upgrade_set
        .restraint_mut(&restraint_id)
        .ok_or(ApiError::NotFound("Restraint item not found"))?;

    let quote = restraint.upgrade_quote()?;
    debug!("Upgrade priced at cost {} and rate {}", quote.cost, quote.new_coin_min);

    if !user.can_afford(quote.new_coin_min) {
        warn!("User {} has {} but needs {}", owner_id, user.get_signup_coin(), quote.new_coin_min);
        return Err(ApiError::InsufficientBalance);
    }

    user.debit(quote.new_coin_min);
    restraint.apply_upgrade(&quote);
    let level = restraint.get_level();

    repo::save_user(&pool, &user).await
        .map_err(ApiError::Database)?;

    let saved = repo::save_upgrade_set(&pool, &upgrade_set).await
        .map_err(ApiError::Database)?;

    info!("Upgraded restraint to level {}, charging {}", level, quote.new_coin_min);

    Ok(Json(saved))
}
