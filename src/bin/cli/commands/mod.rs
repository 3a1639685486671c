pub mod restraint;
pub mod user;
