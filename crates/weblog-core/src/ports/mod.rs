//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{CredentialError, DUMMY_PASSWORD_HASH, PasswordService, SessionStore};
pub use repository::{BaseRepository, CategoryRepository, PostRepository, UserRepository};
