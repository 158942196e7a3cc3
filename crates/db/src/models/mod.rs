//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where rows are patchable

pub mod achievement;
pub mod category;
pub mod task;
pub mod user;
pub mod user_stats;
