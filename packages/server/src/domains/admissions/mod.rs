//! Admissions domain - public applications, merit ranking and the review
//! cascade that turns an approved applicant into an enrolled student.

pub mod actions;
pub mod models;
pub mod types;

pub use models::{Admission, AdmissionStatus};
