pub mod exam;

pub use exam::{Exam, ExamChanges, ExamType, NewExam};
