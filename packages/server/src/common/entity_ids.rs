//! Typed id aliases, one per stored entity.

pub use super::id::Id;

pub struct Account;
pub struct Student;
pub struct Faculty;
pub struct Course;
pub struct Admission;
pub struct Enrollment;
pub struct AttendanceRecord;
pub struct Exam;
pub struct ExamResult;
pub struct Fee;
pub struct HostelAllocation;
pub struct Alumnus;

pub type AccountId = Id<Account>;
pub type StudentId = Id<Student>;
pub type FacultyId = Id<Faculty>;
pub type CourseId = Id<Course>;
pub type AdmissionId = Id<Admission>;
pub type EnrollmentId = Id<Enrollment>;
pub type AttendanceId = Id<AttendanceRecord>;
pub type ExamId = Id<Exam>;
pub type ResultId = Id<ExamResult>;
pub type FeeId = Id<Fee>;
pub type HostelAllocationId = Id<HostelAllocation>;
pub type AlumniId = Id<Alumnus>;
