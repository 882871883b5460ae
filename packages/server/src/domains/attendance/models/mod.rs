pub mod attendance;
pub mod stats;

pub use attendance::{AttendanceCounts, AttendanceRecord, AttendanceStatus, NewAttendance};
pub use stats::AttendanceStats;
