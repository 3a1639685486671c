/// Coinmill: restraint upgrades and passive income for an idle game
///
/// This library provides the data models, database access, and web API for
/// a player's upgrade items ("restraints"), their coins-per-minute rate, and
/// the purchase flow that levels a restraint up.
///
/// ### Modules
///
/// - `config`: Layered configuration (defaults, config file, CLI and environment)
/// - `db`: Database connection management
/// - `dto`: Request and response bodies
/// - `errors`: API error type and its HTTP mapping
/// - `extract`: Request extractors that report rejections as API errors
/// - `handlers`: HTTP request handlers
/// - `models`: Users, upgrade sets and restraints
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
///
/// ### Web API
///
/// - `POST /restraints`: Append a restraint to the first upgrade set
/// - `GET /restraints`: List all upgrade sets
/// - `PUT /restraints/coins-per-minute`: Add to a user's coins-per-minute rate
/// - `PUT /restraints/{upgrade_set_id}/{restraint_id}`: Buy the next level of a restraint
/// - `POST /users`: Create a user
/// - `GET /users/{id}`: Get a user

pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod schema;

#[cfg(test)]
mod test_utils;

use axum::{
    routing::{get, post, put},
    Router,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use dto::*;
pub use errors::ApiError;
use handlers::*;

/// Migrations compiled into the binary
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        // Routes for creating restraints and listing upgrade sets
        .route("/restraints", post(create_restraint_handler).get(list_restraints_handler))
        // Route for adding to a user's passive income
        .route("/restraints/coins-per-minute", put(update_coins_per_minute_handler))
        // Route for buying the next level of a restraint
        .route("/restraints/{upgrade_set_id}/{restraint_id}", put(upgrade_restraint_handler))
        // Routes for users
        .route("/users", post(create_user_handler))
        .route("/users/{id}", get(get_user_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Add the database pool to the application state
        .with_state(pool)
}

/// Runs all pending embedded migrations
///
/// ### Errors
///
/// Returns an error if any migration fails to apply
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    tracing::debug!("Applied {} migrations", applied.len());

    Ok(())
}
