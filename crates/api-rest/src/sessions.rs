//! In-memory registry of search sessions.
//!
//! Each session owns one [`SearchSession`] slot. Nothing is persisted. A
//! session lives until it is deleted, sits idle past the expiry, or is the
//! least recently touched entry when the registry is full.

use medfind_core::SearchSession;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Maximum number of live sessions before the least recently used is evicted.
pub const DEFAULT_SESSION_CAPACITY: usize = 1024;

/// Sessions untouched for this long are swept.
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

struct Entry {
    session: SearchSession,
    last_touched: Instant,
}

#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    capacity: usize,
    idle: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_CAPACITY, DEFAULT_SESSION_IDLE)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding at most `capacity` sessions (at least one), each
    /// expiring after `idle` without a lookup.
    pub fn with_limits(capacity: usize, idle: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            capacity: capacity.max(1),
            idle,
        }
    }

    /// Registers a new idle session under a fresh id.
    ///
    /// Expired sessions are swept first. If the registry is still full, the
    /// least recently touched session is evicted.
    pub fn create(&self) -> (Uuid, SearchSession) {
        let id = Uuid::new_v4();
        let session = SearchSession::new();
        let now = Instant::now();

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        self.sweep(&mut sessions, now);

        if sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_touched)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::debug!(session = %oldest, "session registry full; evicted least recently used");
            }
        }

        sessions.insert(
            id,
            Entry {
                session: session.clone(),
                last_touched: now,
            },
        );
        (id, session)
    }

    /// Looks up a live session and refreshes its idle timer.
    pub fn get(&self, id: &Uuid) -> Option<SearchSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        self.sweep(&mut sessions, now);

        sessions.get_mut(id).map(|entry| {
            entry.last_touched = now;
            entry.session.clone()
        })
    }

    /// Drops a session. Returns `false` if it did not exist.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sweep(&self, sessions: &mut HashMap<Uuid, Entry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_touched) < self.idle);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, "swept idle sessions");
        }
    }
}
