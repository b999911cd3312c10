//! # Weblog Infrastructure
//!
//! Concrete implementations of the ports defined in `weblog-core`.
//! This crate contains the database, credential and session integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory session store only
//! - `database` - SQLite/PostgreSQL storage via SeaORM
//! - `auth` - Argon2 password hashing

pub mod session;

#[cfg(feature = "database")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use session::InMemorySessionStore;

#[cfg(feature = "database")]
pub use database::{DatabaseConfig, SeaOrmCategoryRepository, SeaOrmPostRepository, SeaOrmUserRepository};

#[cfg(feature = "auth")]
pub use auth::Argon2PasswordService;
