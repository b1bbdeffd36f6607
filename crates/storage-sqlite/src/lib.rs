//! SQLite storage implementation for MisMetas.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `mismetas-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, goals and tasks
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!  storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```
//!
//! Reads use pooled connections. Every write goes through the single writer
//! actor ([`WriteHandle`]), one immediate transaction per job.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use goals::GoalRepository;
pub use users::UserRepository;

// Re-export from mismetas-core for convenience
pub use mismetas_core::errors::{DatabaseError, Error, Result};
