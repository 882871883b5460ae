//! Read-only reporting over the other stores

pub mod actions;
pub mod models;

pub use models::Dashboard;
