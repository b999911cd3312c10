use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque session identifier handed to the client after login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionToken),
}

impl Session {
    pub fn token(&self) -> Option<&SessionToken> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(token) => Some(token),
        }
    }
}

/// Where the caller should go after an auth operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Redirect {
    Dashboard,
    Login,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Dashboard => "/dashboard",
            Redirect::Login => "/login",
        }
    }
}

/// Successful login result.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: SessionToken,
    pub redirect: Redirect,
}

impl LoginOutcome {
    pub fn session(&self) -> Session {
        Session::Authenticated(self.token.clone())
    }
}
