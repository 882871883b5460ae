//! Fees domain

pub mod actions;
pub mod models;

pub use models::{Fee, FeeStatus, FeeType};
