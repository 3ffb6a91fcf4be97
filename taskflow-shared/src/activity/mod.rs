/// User activity logging
///
/// Records what users do (create tasks, fetch lists, change status) to the
/// append-only `user_activities` table. Logging is strictly an
/// observability side channel: it never fails, blocks, or rolls back the
/// operation being logged.
///
/// # Modules
///
/// - [`event`]: Typed per-action payloads
/// - [`logger`]: Bounded queue plus background drain task

pub mod event;
pub mod logger;

pub use event::{
    ActivityEvent, PriorityChanged, StatusChanged, TaskCreated, TaskDeleted, TaskUpdated,
    TasksFetched,
};
pub use logger::{
    ActivityEntry, ActivityLogger, ActivityWorker, DEFAULT_QUEUE_CAPACITY, IP_UNAVAILABLE,
    USER_AGENT_UNAVAILABLE,
};
