//! Session Store
//!
//! Keeps one `ExploreState` per browser session. Sessions never share
//! state; the only shared resource is the read-only dataset registry held
//! by the controller.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::error::SessionError;
use super::state::ExploreState;

/// Unique identifier for an explore session
pub type SessionId = String;

/// Configuration for the session store
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of live sessions
    pub max_sessions: usize,
    /// Sessions idle for longer than this are dropped
    pub idle_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

/// A single user's explore session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub state: ExploreState,
    last_seen: Instant,
}

impl Session {
    fn is_idle(&self, timeout: Duration) -> bool {
        self.last_seen.elapsed() > timeout
    }
}

/// Per-session explore state, keyed by session id
///
/// The map lock is held only to look up, insert or remove a session. Each
/// session has its own lock, so recomputing one session's charts never
/// blocks another session.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Register a new session holding `state`
    ///
    /// Idle sessions are pruned first; fails if the store is still full.
    pub async fn create(&self, state: ExploreState) -> Result<Session, SessionError> {
        let mut sessions = self.sessions.write().await;

        let timeout = self.config.idle_timeout;
        let before = sessions.len();
        // A session locked by a running request is in use, not idle
        sessions.retain(|_, s| s.try_lock().map_or(true, |s| !s.is_idle(timeout)));
        if sessions.len() < before {
            tracing::info!(pruned = before - sessions.len(), "Pruned idle sessions");
        }

        if sessions.len() >= self.config.max_sessions {
            return Err(SessionError::TooManySessions(self.config.max_sessions));
        }

        let session = Session {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            state,
            last_seen: Instant::now(),
        };
        sessions.insert(session.id.clone(), Arc::new(Mutex::new(session.clone())));

        tracing::info!(session_id = %session.id, dataset = %session.state.dataset, "Session created");
        Ok(session)
    }

    /// Run `f` against a live session, marking it as recently used
    ///
    /// Only this session is locked while `f` runs.
    pub async fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, SessionError> {
        let handle = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let mut session = handle.lock().await;
        if session.is_idle(self.config.idle_timeout) {
            drop(session);
            let mut sessions = self.sessions.write().await;
            if sessions.get(id).is_some_and(|s| Arc::ptr_eq(s, &handle)) {
                sessions.remove(id);
            }
            tracing::info!(session_id = %id, "Session expired");
            return Err(SessionError::Expired(id.to_string()));
        }

        session.last_seen = Instant::now();
        Ok(f(&mut *session))
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(dataset: &str) -> ExploreState {
        ExploreState::blank(dataset)
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(SessionConfig::default());
        let a = store.create(state("AME 16 Mass")).await.unwrap();
        let b = store.create(state("AME 16 Mass")).await.unwrap();
        assert_ne!(a.id, b.id);

        store
            .with_session(&a.id, |s| s.state.selection.insert(3))
            .await
            .unwrap();

        let a_sel = store.with_session(&a.id, |s| s.state.selection.len()).await.unwrap();
        let b_sel = store.with_session(&b.id, |s| s.state.selection.len()).await.unwrap();
        assert_eq!((a_sel, b_sel), (1, 0));
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = SessionStore::new(SessionConfig::default());
        let err = store.with_session("missing", |_| ()).await.unwrap_err();
        assert_eq!(err, SessionError::NotFound("missing".to_string()));
        assert!(!store.remove("missing").await);
    }

    #[tokio::test]
    async fn test_session_limit() {
        let store = SessionStore::new(SessionConfig {
            max_sessions: 1,
            ..Default::default()
        });
        store.create(state("a")).await.unwrap();
        let err = store.create(state("a")).await.unwrap_err();
        assert_eq!(err, SessionError::TooManySessions(1));
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let store = SessionStore::new(SessionConfig {
            max_sessions: 1,
            idle_timeout: Duration::ZERO,
        });
        let session = store.create(state("a")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let err = store.with_session(&session.id, |_| ()).await.unwrap_err();
        assert!(matches!(err, SessionError::Expired(_)));

        // The limit no longer counts the expired session
        assert!(store.create(state("a")).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_busy_session_does_not_block_others() {
        let store = Arc::new(SessionStore::new(SessionConfig::default()));
        let a = store.create(state("a")).await.unwrap();
        let b = store.create(state("b")).await.unwrap();

        let busy = Arc::clone(&store);
        let slow = tokio::spawn(async move {
            busy.with_session(&a.id, |_| std::thread::sleep(Duration::from_millis(300)))
                .await
                .unwrap();
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        let started = Instant::now();
        let dataset = store
            .with_session(&b.id, |s| s.state.dataset.clone())
            .await
            .unwrap();
        assert_eq!(dataset, "b");
        assert!(started.elapsed() < Duration::from_millis(150));

        slow.await.unwrap();
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new(SessionConfig::default());
        let session = store.create(state("a")).await.unwrap();
        assert!(store.remove(&session.id).await);
        assert_eq!(store.count().await, 0);
    }
}
