use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AttendanceId, CourseId, FacultyId, StudentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// One student's attendance in one course on one day. Never rewritten.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: FacultyId,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: FacultyId,
    pub remarks: Option<String>,
}

/// Per-status totals for a student
#[derive(sqlx::FromRow, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
}

impl AttendanceRecord {
    pub async fn create(new: &NewAttendance, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO attendance (id, student_id, course_id, date, status, marked_by, remarks)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(AttendanceId::new())
        .bind(new.student_id)
        .bind(new.course_id)
        .bind(new.date)
        .bind(new.status)
        .bind(new.marked_by)
        .bind(&new.remarks)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Newest day first
    pub async fn find_filtered(
        student_id: Option<StudentId>,
        course_id: Option<CourseId>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM attendance
             WHERE ($1::UUID IS NULL OR student_id = $1)
               AND ($2::UUID IS NULL OR course_id = $2)
             ORDER BY date DESC, created_at DESC",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_by_status(
        student_id: StudentId,
        course_id: Option<CourseId>,
        pool: &PgPool,
    ) -> Result<AttendanceCounts> {
        sqlx::query_as::<_, AttendanceCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE status = 'present') AS present,
                COUNT(*) FILTER (WHERE status = 'absent') AS absent,
                COUNT(*) FILTER (WHERE status = 'late') AS late
             FROM attendance
             WHERE student_id = $1
               AND ($2::UUID IS NULL OR course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
