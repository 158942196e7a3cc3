//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`TaskEvent`]s. It is
//! shared via `Arc<EventBus>` across the application.

use chrono::Utc;
use planit_core::gamification::TaskEventKind;
use planit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// TaskEvent
// ---------------------------------------------------------------------------

/// A task lifecycle change that may affect the owner's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub kind: TaskEventKind,
    /// Owner of the task; the user whose progress changes.
    pub user_id: DbId,
    pub task_id: DbId,
    /// When the mutation happened (UTC). Its date drives streak bookkeeping.
    pub occurred_at: Timestamp,
}

impl TaskEvent {
    /// An event stamped with the current time.
    pub fn new(kind: TaskEventKind, user_id: DbId, task_id: DbId) -> Self {
        Self {
            kind,
            user_id,
            task_id,
            occurred_at: Utc::now(),
        }
    }

    pub fn created(user_id: DbId, task_id: DbId) -> Self {
        Self::new(TaskEventKind::TaskCreated, user_id, task_id)
    }

    pub fn completed(user_id: DbId, task_id: DbId) -> Self {
        Self::new(TaskEventKind::TaskCompleted, user_id, task_id)
    }

    /// Override the timestamp.
    pub fn at(mut self, occurred_at: Timestamp) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use planit_events::bus::{EventBus, TaskEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(TaskEvent::created(1, 42));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<TaskEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Never fails: with no subscribers the event is dropped, which keeps the
    /// publishing task mutation independent of the consumers.
    pub fn publish(&self, event: TaskEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("Task event published with no subscribers");
        }
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
