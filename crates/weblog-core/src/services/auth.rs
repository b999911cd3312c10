//! Registration, login and session resolution.

use std::sync::Arc;

use crate::domain::{LoginOutcome, NewUser, Redirect, Session, User, UserId};
use crate::error::{DomainError, RepoError};
use crate::ports::{DUMMY_PASSWORD_HASH, PasswordService, SessionStore, UserRepository};
use crate::validation;

/// Session/auth workflow.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            users,
            passwords,
            sessions,
        }
    }

    /// Create an author account. Does not log the user in.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId, DomainError> {
        validation::validate_registration(username, password)?;

        let hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .insert(NewUser::author(username.to_string(), hash))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => DomainError::DuplicateUsername(username.to_string()),
                other => DomainError::StorageFault(other),
            })?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user.id)
    }

    /// Check credentials and open a session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            let _ = self.passwords.verify(password, DUMMY_PASSWORD_HASH);
            tracing::warn!("Login rejected");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &user.password) {
            tracing::warn!("Login rejected");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.sessions.create(user.id).await;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginOutcome {
            token,
            redirect: Redirect::Dashboard,
        })
    }

    /// Clear the session whatever its state.
    pub async fn logout(&self, session: &mut Session) -> Redirect {
        if let Session::Authenticated(token) = std::mem::take(session) {
            self.sessions.revoke(&token).await;
        }
        Redirect::Login
    }

    /// Resolve the session to its user, if any.
    pub async fn current_user(&self, session: &Session) -> Result<Option<User>, DomainError> {
        let Some(token) = session.token() else {
            return Ok(None);
        };
        let Some(user_id) = self.sessions.resolve(token).await else {
            return Ok(None);
        };
        Ok(self.users.find_by_id(user_id).await?)
    }

    /// Route guard: the current user, or `Unauthenticated`.
    pub async fn require_user(&self, session: &Session) -> Result<User, DomainError> {
        self.current_user(session)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }
}
