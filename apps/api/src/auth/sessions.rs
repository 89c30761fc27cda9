//! Per-user session state.
//!
//! A session is created on login, registration-then-login, or guest entry, and
//! discarded on logout or after sitting idle longer than the store's TTL. It
//! owns the current résumé text and the candidate profile derived from it.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::skills::CandidateProfile;
use crate::state::AppState;

pub const GUEST_USERNAME: &str = "guest";
/// Idle time after which a session is evicted, unless configured otherwise.
pub const DEFAULT_IDLE_TTL_SECS: i64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub is_guest: bool,
    pub resume_text: Option<String>,
    pub profile: CandidateProfile,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful lookup.
    pub last_seen: DateTime<Utc>,
}

impl Session {
    /// The résumé text, if one has been submitted and is non-blank.
    pub fn resume(&self) -> Option<&str> {
        self.resume_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_IDLE_TTL_SECS))
    }
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Opens a session. Idle sessions are swept first so anonymous guest
    /// entry cannot grow the map without bound.
    pub fn create(&self, username: &str, is_guest: bool) -> Session {
        self.create_at(username, is_guest, Utc::now())
    }

    fn create_at(&self, username: &str, is_guest: bool, now: DateTime<Utc>) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            username: username.to_string(),
            is_guest,
            resume_text: None,
            profile: CandidateProfile::default(),
            created_at: now,
            last_seen: now,
        };

        let mut sessions = self.sessions.write();
        let evicted = Self::evict_idle(&mut sessions, self.idle_ttl, now);
        if evicted > 0 {
            debug!("Evicted {evicted} idle sessions");
        }
        sessions.insert(session.id, session.clone());
        session
    }

    /// Looks up a live session and marks it as seen. An expired session is
    /// removed and reported as missing.
    pub fn get(&self, id: Uuid) -> Option<Session> {
        self.get_at(id, Utc::now())
    }

    fn get_at(&self, id: Uuid, now: DateTime<Utc>) -> Option<Session> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id)?;
        if now - session.last_seen > self.idle_ttl {
            sessions.remove(&id);
            return None;
        }
        session.last_seen = now;
        Some(session.clone())
    }

    /// Drops every session idle for longer than the TTL. Returns how many went.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        Self::evict_idle(&mut self.sessions.write(), self.idle_ttl, now)
    }

    fn evict_idle(
        sessions: &mut HashMap<Uuid, Session>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_seen <= ttl);
        before - sessions.len()
    }

    /// Replaces the session's résumé and re-derives its profile.
    /// Returns `None` if the session no longer exists.
    pub fn replace_resume(&self, id: Uuid, text: String) -> Option<CandidateProfile> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id)?;
        session.profile = CandidateProfile::from_text(&text);
        session.resume_text = Some(text);
        Some(session.profile.clone())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }
}

/// Extractor for the caller's session, from `Authorization: Bearer <session id>`.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(AppError::Unauthorized)?;

        state
            .sessions
            .get(id)
            .map(CurrentSession)
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::default();
        let session = store.create("ada", false);
        let found = store.get(session.id).unwrap();
        assert_eq!(found.username, "ada");
        assert!(found.resume().is_none());
        assert!(found.profile.skills.is_empty());
    }

    #[test]
    fn test_replace_resume_replaces_profile() {
        let store = SessionStore::default();
        let session = store.create("ada", false);

        store.replace_resume(session.id, "Python Kubernetes".to_string());
        let profile = store
            .replace_resume(session.id, "Terraform Linux".to_string())
            .unwrap();

        assert!(profile.skills.contains("terraform"));
        assert!(!profile.skills.contains("python"));
        assert_eq!(store.get(session.id).unwrap().resume(), Some("Terraform Linux"));
    }

    #[test]
    fn test_replace_resume_on_missing_session() {
        let store = SessionStore::default();
        assert!(store.replace_resume(Uuid::new_v4(), "text".to_string()).is_none());
    }

    #[test]
    fn test_get_refreshes_last_seen() {
        let store = SessionStore::new(Duration::minutes(10));
        let start = Utc::now();
        let session = store.create_at("ada", false, start);

        // Each lookup lands inside the TTL, so the session stays alive well past it.
        for step in 1..=3 {
            let now = start + Duration::minutes(8 * step);
            let found = store.get_at(session.id, now).unwrap();
            assert_eq!(found.last_seen, now);
        }
    }

    #[test]
    fn test_idle_session_expires_on_get() {
        let store = SessionStore::new(Duration::minutes(10));
        let start = Utc::now();
        let session = store.create_at("ada", false, start);

        assert!(store
            .get_at(session.id, start + Duration::minutes(11))
            .is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_create_evicts_abandoned_guest_sessions() {
        let store = SessionStore::new(Duration::minutes(10));
        let start = Utc::now();
        for _ in 0..5000 {
            store.create_at(GUEST_USERNAME, true, start);
        }
        assert_eq!(store.len(), 5000);

        let fresh = store.create_at(GUEST_USERNAME, true, start + Duration::minutes(30));
        assert_eq!(store.len(), 1);
        assert!(store.get_at(fresh.id, start + Duration::minutes(31)).is_some());
    }

    #[test]
    fn test_sweep_keeps_active_sessions() {
        let store = SessionStore::new(Duration::minutes(10));
        let start = Utc::now();
        let idle = store.create_at("idle", false, start);
        let active = store.create_at("active", false, start);
        store.get_at(active.id, start + Duration::minutes(9));

        assert_eq!(store.sweep_expired_at(start + Duration::minutes(12)), 1);
        assert!(store.get_at(idle.id, start + Duration::minutes(12)).is_none());
        assert!(store.get_at(active.id, start + Duration::minutes(12)).is_some());
    }

    #[test]
    fn test_remove_discards_session() {
        let store = SessionStore::default();
        let session = store.create(GUEST_USERNAME, true);
        assert!(store.remove(session.id));
        assert!(store.get(session.id).is_none());
        assert!(!store.remove(session.id));
        assert_eq!(store.len(), 0);
    }
}
