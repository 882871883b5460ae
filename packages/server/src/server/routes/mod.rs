// HTTP routes
pub mod admissions;
pub mod alumni;
pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod exams;
pub mod fees;
pub mod health;
pub mod hostels;
pub mod results;

pub use admissions::*;
pub use alumni::*;
pub use analytics::*;
pub use attendance::*;
pub use auth::*;
pub use courses::*;
pub use enrollments::*;
pub use exams::*;
pub use fees::*;
pub use health::*;
pub use hostels::*;
pub use results::*;
