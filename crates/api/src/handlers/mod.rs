pub mod auth;
pub mod categories;
pub mod gamification;
pub mod tasks;
