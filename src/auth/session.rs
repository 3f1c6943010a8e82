//! Session Store
//!
//! Server-side sessions keyed by an opaque cookie token. Sessions live in
//! process memory only — a restart logs everyone out, which is the intended
//! lifecycle for this system.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Session state derived per request from the cookie token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(String),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

#[derive(Debug, Clone)]
struct Session {
    identity: String,
    expires_at: DateTime<Utc>,
}

/// In-process session table
///
/// DashMap 实现无锁并发访问；令牌为 UUID v4。
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Create a session for `identity` and return the cookie token
    pub fn create(&self, identity: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                identity: identity.to_string(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        token
    }

    /// Re-derive the session state from a token. Expired sessions are
    /// removed on sight and read as `Anonymous`.
    pub fn lookup(&self, token: &str) -> SessionState {
        let now = Utc::now();
        if let Some(session) = self.sessions.get(token)
            && session.expires_at > now
        {
            return SessionState::Authenticated(session.identity.clone());
        }

        // lazy cleanup of the expired entry
        self.sessions.remove_if(token, |_, s| s.expires_at <= now);
        SessionState::Anonymous
    }

    /// Destroy a session. Returns whether one existed; either way the
    /// caller ends up logged out.
    pub fn destroy(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_lookup_is_authenticated() {
        let store = SessionStore::new(60);
        let token = store.create("admin@example.com");
        assert_eq!(
            store.lookup(&token),
            SessionState::Authenticated("admin@example.com".to_string())
        );
    }

    #[test]
    fn test_unknown_token_is_anonymous() {
        let store = SessionStore::new(60);
        assert_eq!(store.lookup("no-such-token"), SessionState::Anonymous);
    }

    #[test]
    fn test_destroy_ends_in_anonymous() {
        let store = SessionStore::new(60);
        let token = store.create("admin@example.com");
        assert!(store.destroy(&token));
        assert_eq!(store.lookup(&token), SessionState::Anonymous);
        // destroying again must still succeed from the caller's perspective
        assert!(!store.destroy(&token));
    }

    #[test]
    fn test_expired_session_reads_anonymous_and_is_dropped() {
        let store = SessionStore::new(0);
        let token = store.create("admin@example.com");
        assert_eq!(store.lookup(&token), SessionState::Anonymous);
        assert!(store.is_empty());
    }

    #[test]
    fn test_tokens_are_unique_per_login() {
        let store = SessionStore::new(60);
        let a = store.create("admin@example.com");
        let b = store.create("admin@example.com");
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }
}
