//! Alumni domain - graduates and their post-graduation profile

pub mod actions;
pub mod models;

pub use models::Alumnus;
