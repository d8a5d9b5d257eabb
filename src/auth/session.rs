//! Bearer-token session store
//!
//! Sessions live in memory and expire after a fixed lifetime. Logout
//! revokes the token immediately; a restart clears all sessions.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::RwLock;
use tracing::debug;

/// An active login session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Generate an opaque random session token.
fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// In-memory store of active sessions, keyed by token.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    lifetime: Duration,
}

impl SessionStore {
    pub fn new(lifetime_hours: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            lifetime: Duration::hours(lifetime_hours),
        }
    }

    /// Create and store a session for a user.
    pub async fn create(&self, user_id: &str) -> Session {
        let now = Utc::now();
        let session = Session {
            token: generate_token(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + self.lifetime,
        };
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        debug!(user_id = %user_id, expires_at = %session.expires_at, "Session created");
        session
    }

    /// Resolve a token to its session, if present and not expired.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(token).filter(|s| !s.is_expired()).cloned()
    }

    /// Revoke a token. Returns whether it existed.
    pub async fn revoke(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token).is_some();
        if removed {
            debug!("Session revoked");
        }
        removed
    }

    /// Drop expired sessions.
    pub async fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed = %removed, "Cleaned up expired sessions");
        }
    }
}
