//! Enrollments domain - course registration with duplicate and capacity checks

pub mod actions;
pub mod models;

pub use models::{Enrollment, EnrollmentStatus};
