/// Best-effort activity logger
///
/// The logger is a side channel: callers hand it an [`ActivityEntry`] and
/// move on. Entries go into a bounded queue that a single background task
/// drains into an [`ActivityStore`]. Nothing on this path can fail the
/// caller's operation.
///
/// # Failure Policy
///
/// - Missing user id: the entry is dropped with a warning
/// - Queue full or closed: the entry is dropped with a warning
/// - Store error: logged by the drain task and swallowed
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskflow_shared::activity::{ActivityEntry, ActivityEvent, ActivityLogger};
/// use taskflow_shared::store::memory::MemoryActivityStore;
/// use uuid::Uuid;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryActivityStore::new();
/// let (logger, worker) = ActivityLogger::spawn(Arc::new(store.clone()), 64);
///
/// logger.log(ActivityEntry::new(Uuid::new_v4(), ActivityEvent::Login));
///
/// drop(logger);
/// worker.join().await;
/// assert_eq!(store.all().await.len(), 1);
/// # }
/// ```

use super::event::ActivityEvent;
use crate::models::user_activity::NewUserActivity;
use crate::store::ActivityStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Stored when the caller has no client IP to attribute
pub const IP_UNAVAILABLE: &str = "IP Unavailable";

/// Stored when the caller has no user agent to attribute
pub const USER_AGENT_UNAVAILABLE: &str = "User-Agent Unavailable";

/// Default queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// One activity to record
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    /// Acting user; entries without one are never written
    pub user_id: Option<Uuid>,

    /// What happened
    pub event: ActivityEvent,

    /// Client IP, defaults to [`IP_UNAVAILABLE`]
    pub ip_address: Option<String>,

    /// Client user agent, defaults to [`USER_AGENT_UNAVAILABLE`]
    pub user_agent: Option<String>,
}

impl ActivityEntry {
    pub fn new(user_id: impl Into<Option<Uuid>>, event: ActivityEvent) -> Self {
        Self {
            user_id: user_id.into(),
            event,
            ip_address: None,
            user_agent: None,
        }
    }

    /// Attaches client details
    pub fn with_client(mut self, ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the row to append, stamping the current time
    ///
    /// Returns `None` when there is no user to attribute the entry to.
    pub fn into_record(self) -> Option<NewUserActivity> {
        let user_id = self.user_id.filter(|id| !id.is_nil())?;
        let now = Utc::now();

        Some(NewUserActivity {
            user_id,
            action: self.event.kind(),
            metadata: self.event.metadata(now),
            ip_address: self.ip_address.unwrap_or_else(|| IP_UNAVAILABLE.to_string()),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| USER_AGENT_UNAVAILABLE.to_string()),
            logged_at: now,
        })
    }
}

/// Handle for submitting activity entries
///
/// Cheap to clone; every clone feeds the same queue.
#[derive(Clone)]
pub struct ActivityLogger {
    tx: mpsc::Sender<NewUserActivity>,
}

/// Background task draining the activity queue
pub struct ActivityWorker {
    handle: JoinHandle<()>,
}

impl ActivityWorker {
    /// Waits for the queue to drain
    ///
    /// Completes once every [`ActivityLogger`] clone has been dropped and all
    /// queued entries have been handed to the store.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            error!(error = %e, "Activity worker terminated abnormally");
        }
    }
}

impl ActivityLogger {
    /// Starts the drain task on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, or if `capacity` is zero.
    pub fn spawn(store: Arc<dyn ActivityStore>, capacity: usize) -> (Self, ActivityWorker) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = tokio::spawn(drain(store, rx));

        (Self { tx }, ActivityWorker { handle })
    }

    /// Submits an entry without waiting for it to be stored
    pub fn log(&self, entry: ActivityEntry) {
        let action = entry.event.kind();

        let Some(record) = entry.into_record() else {
            warn!(%action, "No user ID provided for activity logging");
            return;
        };

        match self.tx.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                warn!(
                    %action,
                    user_id = %record.user_id,
                    "Activity queue full, dropping entry"
                );
            }
            Err(TrySendError::Closed(record)) => {
                warn!(
                    %action,
                    user_id = %record.user_id,
                    "Activity queue closed, dropping entry"
                );
            }
        }
    }
}

async fn drain(store: Arc<dyn ActivityStore>, mut rx: mpsc::Receiver<NewUserActivity>) {
    while let Some(record) = rx.recv().await {
        let action = record.action;
        let user_id = record.user_id;

        match store.append(record).await {
            Ok(row) => {
                debug!(activity_id = %row.id, %action, %user_id, "User activity logged");
            }
            Err(e) => {
                error!(error = %e, %action, %user_id, "Failed to log activity");
            }
        }
    }

    debug!("Activity queue closed, worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::event::{TaskCreated, TasksFetched};
    use crate::models::user_activity::{ActivityKind, UserActivity};
    use crate::store::{memory::MemoryActivityStore, StoreError, StoreResult};
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl ActivityStore for BrokenStore {
        async fn append(&self, _activity: NewUserActivity) -> StoreResult<UserActivity> {
            Err(StoreError::Unavailable("disk on fire".to_string()))
        }

        async fn list_recent(&self, _user_id: Uuid, _limit: i64) -> StoreResult<Vec<UserActivity>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_into_record_applies_defaults() {
        let user_id = Uuid::new_v4();
        let record = ActivityEntry::new(user_id, ActivityEvent::Login)
            .into_record()
            .unwrap();

        assert_eq!(record.user_id, user_id);
        assert_eq!(record.action, ActivityKind::Login);
        assert_eq!(record.ip_address, IP_UNAVAILABLE);
        assert_eq!(record.user_agent, USER_AGENT_UNAVAILABLE);
        assert!(record.metadata["timestamp"].is_string());
    }

    #[test]
    fn test_into_record_without_user_is_none() {
        assert!(ActivityEntry::new(None, ActivityEvent::Login).into_record().is_none());
        assert!(ActivityEntry::new(Uuid::nil(), ActivityEvent::Login).into_record().is_none());
    }

    #[tokio::test]
    async fn test_logged_entries_reach_store() {
        let store = MemoryActivityStore::new();
        let (logger, worker) = ActivityLogger::spawn(Arc::new(store.clone()), 8);
        let user_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();

        logger.log(
            ActivityEntry::new(
                user_id,
                ActivityEvent::TaskCreate(TaskCreated {
                    task_id,
                    title: "Buy milk".to_string(),
                    due_date: None,
                }),
            )
            .with_client("10.0.0.7", "curl/8.0"),
        );
        logger.log(ActivityEntry::new(None, ActivityEvent::Login));

        drop(logger);
        worker.join().await;

        let rows = store.all().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].action, ActivityKind::TaskCreate);
        assert_eq!(rows[0].metadata["title"], "Buy milk");
        assert_eq!(rows[0].ip_address, "10.0.0.7");
        assert_eq!(rows[0].user_agent, "curl/8.0");
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let (logger, worker) = ActivityLogger::spawn(Arc::new(BrokenStore), 8);

        logger.log(ActivityEntry::new(
            Uuid::new_v4(),
            ActivityEvent::TaskFetch(TasksFetched { total_tasks_fetched: 0 }),
        ));

        drop(logger);
        worker.join().await;
    }

    #[tokio::test]
    async fn test_full_queue_drops_instead_of_blocking() {
        let store = MemoryActivityStore::new();
        let (tx, rx) = mpsc::channel(1);
        let logger = ActivityLogger { tx };
        let user_id = Uuid::new_v4();

        // Nothing drains yet, so the second entry has nowhere to go.
        logger.log(ActivityEntry::new(user_id, ActivityEvent::Login));
        logger.log(ActivityEntry::new(user_id, ActivityEvent::Signup));

        drop(logger);
        drain(Arc::new(store.clone()), rx).await;

        let rows = store.all().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].action, ActivityKind::Login);
    }
}
