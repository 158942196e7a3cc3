//! Task event plumbing for PlanIt.
//!
//! Task handlers never call the stats updater directly. They publish a
//! [`TaskEvent`] on the [`EventBus`]; the [`ProgressTracker`] background
//! service consumes those events and applies them to the user's progress.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`TaskEvent`] -- the typed event envelope.
//! - [`ProgressTracker`] -- consumer that feeds events into
//!   `UserStatsRepo::apply_event`.

pub mod bus;
pub mod progress;

pub use bus::{EventBus, TaskEvent};
pub use progress::ProgressTracker;
