//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod roll_numbers;
pub mod scheduled_tasks;

pub use deps::ServerDeps;
pub use roll_numbers::{format_roll_number, initial_password, RollNumberSequence};
pub use scheduled_tasks::start_scheduler;
