/// Data models module
///
/// This module defines the core data structures used throughout the application:
/// users with their balance and passive income, and upgrade sets holding the
/// ordered list of restraints a player can level up.

pub mod cost;

mod user;
pub use user::User;

mod restraint;
pub use restraint::{Restraint, UpgradeError, UpgradeQuote};

mod upgrade_set;
pub use upgrade_set::{UpgradeSet, UpgradeSetRecord};
