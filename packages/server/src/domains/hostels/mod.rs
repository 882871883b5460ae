//! Hostels domain

pub mod actions;
pub mod models;

pub use models::{HostelAllocation, HostelStatus, RoomType};
