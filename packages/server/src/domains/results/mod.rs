//! Results domain - marks per exam with derived letter grades

pub mod actions;
pub mod models;

pub use models::{ExamResult, Grade};
