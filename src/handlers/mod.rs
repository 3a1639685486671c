/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler is responsible for processing a specific type of HTTP request,
/// extracting the necessary data, calling the appropriate repository functions,
/// and returning a properly formatted response.

mod restraint_handlers;
mod user_handlers;

// Re-export all handlers
pub use restraint_handlers::*;
pub use user_handlers::*;

use uuid::Uuid;

use crate::errors::ApiError;

/// Whether `id` is written the way stored IDs are: a lowercase hyphenated UUID
fn is_stored_id_form(id: &str) -> bool {
    Uuid::parse_str(id).is_ok_and(|uuid| uuid.hyphenated().to_string() == id)
}

/// Rejects path IDs that are not in the stored UUID form
fn ensure_valid_ids(ids: &[&str]) -> Result<(), ApiError> {
    if ids.iter().all(|id| is_stored_id_form(id)) {
        Ok(())
    } else {
        Err(ApiError::InvalidId)
    }
}
