//! In-memory store of analysis sessions awaiting their follow-up question.
//!
//! A session is inserted by a successful analysis and removed by `take`, so each analysis
//! admits exactly one follow-up. Entries older than the TTL are purged on every insert.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::AnalysisSession;

const DEFAULT_CAPACITY: usize = 1024;

pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, AnalysisSession>>,
    ttl: Duration,
    capacity: usize,
}

impl SessionStore {
    pub fn new(ttl_secs: u32) -> Self {
        Self::with_capacity(ttl_secs, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(ttl_secs: u32, capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(i64::from(ttl_secs)),
            capacity: capacity.max(1),
        }
    }

    pub fn insert(&self, session: AnalysisSession) {
        let mut sessions = self.lock();
        let cutoff = Utc::now() - self.ttl;
        sessions.retain(|_, s| s.created_at > cutoff);

        while sessions.len() >= self.capacity {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }
        sessions.insert(session.id, session);
    }

    /// Removes and returns a live session. Expired sessions are dropped and reported as absent.
    pub fn take(&self, id: Uuid) -> Option<AnalysisSession> {
        let session = self.lock().remove(&id)?;
        if session.created_at <= Utc::now() - self.ttl {
            return None;
        }
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // Poisoning is ignored: entries are independent of each other.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, AnalysisSession>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisMode;

    fn session_at(created_at: chrono::DateTime<Utc>) -> AnalysisSession {
        AnalysisSession {
            id: Uuid::new_v4(),
            mode: AnalysisMode::QuickScan,
            resume_text: "Alice".to_string(),
            analysis: "Looks good".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_take_consumes_session() {
        let store = SessionStore::new(3600);
        let session = session_at(Utc::now());
        let id = session.id;
        store.insert(session);
        assert!(store.take(id).is_some());
        assert!(store.take(id).is_none(), "second follow-up must not find the session");
    }

    #[test]
    fn test_unknown_session_is_absent() {
        let store = SessionStore::new(3600);
        assert!(store.take(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_expired_session_is_absent() {
        let store = SessionStore::new(60);
        let session = session_at(Utc::now() - Duration::seconds(120));
        let id = session.id;
        store.sessions.lock().unwrap().insert(id, session);
        assert!(store.take(id).is_none());
    }

    #[test]
    fn test_insert_purges_expired_sessions() {
        let store = SessionStore::new(60);
        let stale = session_at(Utc::now() - Duration::seconds(120));
        store.sessions.lock().unwrap().insert(stale.id, stale);
        store.insert(session_at(Utc::now()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_largest_ttl_keeps_sessions() {
        let store = SessionStore::new(u32::MAX);
        let session = session_at(Utc::now() - Duration::days(365));
        let id = session.id;
        store.insert(session);
        assert!(store.take(id).is_some());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = SessionStore::with_capacity(3600, 2);
        let oldest = session_at(Utc::now() - Duration::seconds(30));
        let middle = session_at(Utc::now() - Duration::seconds(10));
        let newest = session_at(Utc::now());
        let (oldest_id, middle_id, newest_id) = (oldest.id, middle.id, newest.id);

        store.insert(oldest);
        store.insert(middle);
        store.insert(newest);

        assert_eq!(store.len(), 2);
        assert!(store.take(oldest_id).is_none());
        assert!(store.take(middle_id).is_some());
        assert!(store.take(newest_id).is_some());
    }
}
