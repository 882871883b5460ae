pub mod admission;

pub use admission::{Admission, AdmissionStatus, NewAdmission};
