pub mod course;
pub mod faculty;
pub mod student;

pub use course::{Course, CourseChanges, CourseListing, NewCourse};
pub use faculty::{Faculty, NewFaculty};
pub use student::{NewStudent, Student, StudentStatus};
