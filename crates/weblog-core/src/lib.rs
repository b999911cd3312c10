//! # Weblog Core
//!
//! The domain layer of the weblog.
//! Entities, ports, validation and the auth/authoring workflows live here,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
pub use services::{AuthService, PostService};
