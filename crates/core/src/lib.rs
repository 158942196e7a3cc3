//! Pure domain rules for PlanIt.
//!
//! Nothing in this crate performs I/O. The database, event and HTTP layers
//! call into these modules to decide what to persist and what to return.
//!
//! - [`gamification`] -- points, streak and level rules applied per task event.
//! - [`achievements`] -- achievement catalog and the progress evaluator.
//! - [`tasks`] -- task status/priority vocabulary and event classification.
//! - [`categories`] -- category defaults and validators.

pub mod achievements;
pub mod categories;
pub mod error;
pub mod gamification;
pub mod tasks;
pub mod types;
