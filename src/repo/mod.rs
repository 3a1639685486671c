/// Repository module
///
/// This module provides the data access layer for the application.
/// Users are stored as plain rows. Upgrade sets are stored as documents: a row
/// in `upgrade_sets` plus its restraints in `restraints`, loaded and saved as
/// one unit.

mod user_repo;
mod upgrade_set_repo;

// Re-export all repository functions
pub use user_repo::*;
pub use upgrade_set_repo::*;
