use crate::db::{DbPool, ExecuteWithRetry};
use crate::models::User;
use crate::schema::users;
use diesel::prelude::*;
use anyhow::{Result, anyhow};
use tracing::{instrument, debug, info};

/// Creates a new user in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `signup_coin` - The user's starting balance
/// * `coins_per_minute` - The user's starting passive income rate
///
/// ### Returns
///
/// A Result containing the newly created User if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool))]
pub async fn create_user(pool: &DbPool, signup_coin: f64, coins_per_minute: f64) -> Result<User> {
    debug!("Creating new user");

    let conn = &mut pool.get()?;

    let new_user = User::new(signup_coin, coins_per_minute);

    diesel::insert_into(users::table)
        .values(new_user.clone())
        .execute_with_retry(conn).await?;

    info!("Successfully created user with id: {}", new_user.get_id());

    Ok(new_user)
}


/// Retrieves a user from the database by its ID
///
/// ### Returns
///
/// A Result containing an Option with the User if found, or None if not found
#[instrument(skip(pool), fields(user_id = %id))]
pub fn get_user(pool: &DbPool, id: &str) -> Result<Option<User>> {
    debug!("Retrieving user");

    let conn = &mut pool.get()?;

    let result = users::table
        .find(id)
        .select(User::as_select())
        .first::<User>(conn)
        .optional()?;

    if result.is_some() {
        debug!("User found");
    } else {
        debug!("User not found");
    }

    Ok(result)
}


/// Overwrites a user's passive income rate
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `id` - The ID of the user to update
/// * `coins_per_minute` - The new rate
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database update fails
/// - No user with that ID exists
#[instrument(skip(pool), fields(user_id = %id))]
pub async fn set_coins_per_minute(pool: &DbPool, id: &str, coins_per_minute: f64) -> Result<()> {
    debug!("Setting coins per minute");

    let conn = &mut pool.get()?;

    let updated = diesel::update(users::table.find(id.to_string()))
        .set(users::coins_per_minute.eq(coins_per_minute))
        .execute_with_retry(conn).await?;

    if updated == 0 {
        return Err(anyhow!("User with id {} not found", id));
    }

    info!("Set coins per minute to {}", coins_per_minute);

    Ok(())
}


/// Writes a user's balance and rate back to the database
///
/// ### Returns
///
/// A Result containing the user as stored
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database update fails
/// - No user with that ID exists
#[instrument(skip(pool, user), fields(user_id = %user.get_id()))]
pub async fn save_user(pool: &DbPool, user: &User) -> Result<User> {
    debug!("Saving user");

    let mut conn = pool.get()?;

    let updated = diesel::update(users::table.find(user.get_id()))
        .set((
            users::signup_coin.eq(user.get_signup_coin()),
            users::coins_per_minute.eq(user.get_coins_per_minute()),
        ))
        .execute_with_retry(&mut conn).await?;

    if updated == 0 {
        return Err(anyhow!("User with id {} not found", user.get_id()));
    }

    drop(conn);

    let saved = get_user(pool, &user.get_id())?
        .ok_or_else(|| anyhow!("User with id {} not found after save", user.get_id()))?;

    debug!("Saved user with balance {}", saved.get_signup_coin());

    Ok(saved)
}
