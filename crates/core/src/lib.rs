//! MisMetas Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for MisMetas: goals and their
//! tasks, users and sessions, and the goal creation wizard. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` and `ai` crates.

pub mod assistant;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod notifications;
pub mod users;
pub mod utils;
pub mod wizard;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
