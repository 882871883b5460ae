use serde::Serialize;

use super::attendance::AttendanceCounts;

/// Attendance summary. Late counts as attended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub percentage: f64,
}

impl AttendanceStats {
    pub fn from_counts(counts: AttendanceCounts) -> Self {
        let total = counts.present + counts.absent + counts.late;
        let percentage = if total == 0 {
            0.0
        } else {
            let raw = (counts.present + counts.late) as f64 / total as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        };

        Self {
            total,
            present: counts.present,
            absent: counts.absent,
            late: counts.late,
            percentage,
        }
    }
}
