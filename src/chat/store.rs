//! In-memory session store mapping a session ID to its chat history.
//!
//! All locking lives here. The map lock is only held long enough to
//! look up or insert a session handle, each session then has its own
//! lock so appends to one session never wait on another.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::models::{History, Turn};

/// Optional bounds on how many sessions are kept and for how long.
/// Leaving both unset keeps every session for the life of the
/// process.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionLimits {
    pub ttl: Option<Duration>,
    pub max_sessions: Option<usize>,
}

struct Session {
    history: History,
    last_access: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            history: History::new(),
            last_access: Instant::now(),
        }
    }
}

type SessionHandle = Arc<Mutex<Session>>;

// A panic while holding a lock can't leave a `History` half written
// so a poisoned lock is still safe to use.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// A handle is only cloned while the map lock is held so a count of
// one means no lease or store call is using the session right now.
fn is_idle(handle: &SessionHandle) -> bool {
    Arc::strong_count(handle) == 1
}

/// A session held across an exchange that spans an `await`.
pub struct SessionLease {
    handle: SessionHandle,
}

impl SessionLease {
    pub fn append_and_trim(&self, turn: Turn) -> History {
        let mut session = lock(&self.handle);
        session.history.push(turn);
        session.last_access = Instant::now();
        session.history.clone()
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionHandle>>>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            limits,
        }
    }

    fn handle(&self, session_id: &str) -> SessionHandle {
        let mut sessions = lock(&self.sessions);
        if let Some(handle) = sessions.get(session_id) {
            return Arc::clone(handle);
        }

        // Best effort: when every session is leased the map grows past
        // the limit instead of dropping a conversation in progress
        if let Some(max_sessions) = self.limits.max_sessions {
            while sessions.len() >= max_sessions {
                let Some(evict_id) = Self::least_recently_used(&sessions) else {
                    break;
                };
                tracing::debug!("Evicting least recently used session {}", evict_id);
                sessions.remove(&evict_id);
            }
        }

        tracing::debug!("Creating chat session {}", session_id);
        let handle = Arc::new(Mutex::new(Session::new()));
        sessions.insert(session_id.to_string(), Arc::clone(&handle));
        handle
    }

    fn least_recently_used(sessions: &HashMap<String, SessionHandle>) -> Option<String> {
        sessions
            .iter()
            .filter(|(_, handle)| is_idle(handle))
            .min_by_key(|(_, handle)| lock(handle).last_access)
            .map(|(id, _)| id.clone())
    }

    /// Returns the history for `session_id`, creating an empty one if
    /// the session hasn't been seen before.
    pub fn get_or_create(&self, session_id: &str) -> History {
        let handle = self.handle(session_id);
        let mut session = lock(&handle);
        session.last_access = Instant::now();
        session.history.clone()
    }

    /// Appends `turn` to the session's history and trims it to the
    /// maximum length. Returns the history as it is after the append.
    pub fn append_and_trim(&self, session_id: &str, turn: Turn) -> History {
        self.lease(session_id).append_and_trim(turn)
    }

    /// Pins the session, creating it if needed. While the lease is
    /// alive neither `prune_expired` nor LRU eviction will remove it.
    pub fn lease(&self, session_id: &str) -> SessionLease {
        SessionLease {
            handle: self.handle(session_id),
        }
    }

    /// Returns the history for `session_id` without creating it.
    pub fn history(&self, session_id: &str) -> Option<History> {
        let handle = lock(&self.sessions).get(session_id).map(Arc::clone)?;
        let history = lock(&handle).history.clone();
        Some(history)
    }

    /// Removes every idle session that hasn't been touched within the
    /// configured TTL. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let Some(ttl) = self.limits.ttl else {
            return 0;
        };
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, handle| !is_idle(handle) || lock(handle).last_access.elapsed() <= ttl);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
