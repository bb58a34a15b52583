use std::time::Duration;

use async_trait::async_trait;

use super::PeriodicJob;
use crate::chat::SessionStore;

/// Drops chat sessions that have been idle longer than the store's
/// TTL. `ttl` should match it and only sets how often the job runs.
#[derive(Debug)]
pub struct PruneSessions {
    pub ttl: Duration,
}

#[async_trait]
impl PeriodicJob for PruneSessions {
    fn interval(&self) -> Duration {
        // Check a few times per TTL so sessions don't linger much past
        // it, but never spin faster than once a second
        (self.ttl / 4).max(Duration::from_secs(1))
    }

    async fn run_job(&self, sessions: &SessionStore) {
        let removed = sessions.prune_expired();
        if removed > 0 {
            tracing::info!(
                "Pruned {} expired chat sessions, {} remaining",
                removed,
                sessions.len()
            );
        }
    }
}
