use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{CourseId, EnrollmentId, StudentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "enrollment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Dropped,
}

/// A student's seat in a course for one semester
///
/// Dropping keeps the row, so the (student, course, semester) triple stays
/// taken.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub semester: i32,
    pub academic_year: String,
    pub status: EnrollmentStatus,
    pub enrollment_date: DateTime<Utc>,
}

/// Enrollment with the course and student it links
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct EnrollmentListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course_code: String,
    pub course_name: String,
    pub student_name: String,
    pub roll_number: String,
}

impl Enrollment {
    pub async fn find_by_id(id: EnrollmentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM enrollments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Any record for the triple, whatever its status
    pub async fn find_existing(
        student_id: StudentId,
        course_id: CourseId,
        semester: i32,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM enrollments
             WHERE student_id = $1 AND course_id = $2 AND semester = $3",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(semester)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn count_active(course_id: CourseId, conn: &mut PgConnection) -> Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments WHERE course_id = $1 AND status = 'active'",
        )
        .bind(course_id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn create(
        student_id: StudentId,
        course_id: CourseId,
        semester: i32,
        academic_year: &str,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO enrollments (id, student_id, course_id, semester, academic_year)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(EnrollmentId::new())
        .bind(student_id)
        .bind(course_id)
        .bind(semester)
        .bind(academic_year)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn drop_enrollment(id: EnrollmentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE enrollments SET status = 'dropped' WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Newest first, optionally for one student
    pub async fn find_listings(
        student_id: Option<StudentId>,
        pool: &PgPool,
    ) -> Result<Vec<EnrollmentListing>> {
        sqlx::query_as::<_, EnrollmentListing>(
            "SELECT
                e.*,
                c.course_code,
                c.course_name,
                s.name AS student_name,
                s.roll_number
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             JOIN students s ON s.id = e.student_id
             WHERE ($1::UUID IS NULL OR e.student_id = $1)
             ORDER BY e.enrollment_date DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
