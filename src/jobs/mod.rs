//! Background jobs that run on a fixed interval for the lifetime of
//! the server.
use std::time::Duration;

use async_trait::async_trait;

use crate::chat::SessionStore;

mod prune_sessions;
pub use prune_sessions::PruneSessions;

#[async_trait]
pub trait PeriodicJob: Send + Sync + 'static {
    fn interval(&self) -> Duration;
    async fn run_job(&self, sessions: &SessionStore);
}

/// Spawn `job` in its own tokio task. The first run happens after one
/// full interval has passed.
pub fn spawn_periodic_job(sessions: SessionStore, job: impl PeriodicJob) {
    tokio::spawn(async move {
        let period = job.interval();
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;
            job.run_job(&sessions).await;
        }
    });
}
