//! Exams domain

pub mod actions;
pub mod models;

pub use models::{Exam, ExamType};
