// Business domains
pub mod academics;
pub mod admissions;
pub mod alumni;
pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod enrollments;
pub mod exams;
pub mod fees;
pub mod hostels;
pub mod results;
