pub mod grade;
pub mod result;

pub use grade::Grade;
pub use result::{ExamResult, ResultListing};
