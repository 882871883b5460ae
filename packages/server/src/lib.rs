// AMU Campus - API Core
//
// Student life-cycle backend: admissions with merit ranking, enrollment,
// attendance, exams and results, fees, hostels and alumni.
//
// Business logic lives per-domain in domains/*/actions; the server layer
// only extracts requests and maps errors.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
