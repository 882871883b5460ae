//! Attendance domain - daily marks per course and the derived percentage

pub mod actions;
pub mod models;

pub use models::{AttendanceRecord, AttendanceStats, AttendanceStatus};
