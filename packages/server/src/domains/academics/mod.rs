//! Academic records - students, faculty and the course catalogue

pub mod actions;
pub mod models;

pub use models::{Course, Faculty, Student, StudentStatus};
