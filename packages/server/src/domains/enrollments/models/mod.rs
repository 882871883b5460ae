pub mod enrollment;

pub use enrollment::{Enrollment, EnrollmentListing, EnrollmentStatus};
