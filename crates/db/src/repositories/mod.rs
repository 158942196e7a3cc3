//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod achievement_repo;
pub mod category_repo;
pub mod task_repo;
pub mod user_repo;
pub mod user_stats_repo;

pub use achievement_repo::AchievementRepo;
pub use category_repo::CategoryRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
pub use user_stats_repo::UserStatsRepo;
