//! In-memory session store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use weblog_core::domain::{SessionToken, UserId};
use weblog_core::ports::SessionStore;

struct SessionEntry {
    user_id: UserId,
    expires_at: Option<Instant>,
}

/// Session store keeping token -> user bindings in a HashMap behind an async RwLock.
///
/// Sessions are lost on process restart.
pub struct InMemorySessionStore {
    store: RwLock<HashMap<SessionToken, SessionEntry>>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    /// Store whose sessions never expire.
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_expired(entry: &SessionEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }

    /// Number of stored sessions. Expired ones count until the next `create`
    /// or until they are resolved.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: UserId) -> SessionToken {
        let token = SessionToken::generate();
        let expires_at = self.ttl.and_then(|d| Instant::now().checked_add(d));

        let mut store = self.store.write().await;
        if self.ttl.is_some() {
            store.retain(|_, entry| !Self::is_expired(entry));
        }
        store.insert(
            token.clone(),
            SessionEntry {
                user_id,
                expires_at,
            },
        );

        tracing::debug!(user_id, "Session opened");
        token
    }

    async fn resolve(&self, token: &SessionToken) -> Option<UserId> {
        let store = self.store.read().await;
        let entry = store.get(token)?;

        if Self::is_expired(entry) {
            drop(store);
            let mut store = self.store.write().await;
            store.remove(token);
            return None;
        }

        Some(entry.user_id)
    }

    async fn revoke(&self, token: &SessionToken) {
        let mut store = self.store.write().await;
        store.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_resolve() {
        let sessions = InMemorySessionStore::new();
        let token = sessions.create(7).await;
        assert_eq!(sessions.resolve(&token).await, Some(7));
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let sessions = InMemorySessionStore::new();
        let first = sessions.create(1).await;
        let second = sessions.create(1).await;

        assert_ne!(first, second);
        assert_eq!(sessions.len().await, 2);
    }

    #[tokio::test]
    async fn test_revoke() {
        let sessions = InMemorySessionStore::new();
        let token = sessions.create(7).await;

        sessions.revoke(&token).await;
        sessions.revoke(&token).await;

        assert_eq!(sessions.resolve(&token).await, None);
        assert!(sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted() {
        let sessions = InMemorySessionStore::with_ttl(Some(Duration::from_millis(5)));
        let token = sessions.create(7).await;

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(sessions.resolve(&token).await, None);
        assert!(sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_abandoned_sessions_are_pruned_on_create() {
        let sessions = InMemorySessionStore::with_ttl(Some(Duration::from_millis(50)));
        for user_id in 0..100 {
            sessions.create(user_id).await;
        }
        assert_eq!(sessions.len().await, 100);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let fresh = sessions.create(7).await;

        assert_eq!(sessions.len().await, 1);
        assert_eq!(sessions.resolve(&fresh).await, Some(7));
    }
}
