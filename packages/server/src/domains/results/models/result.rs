use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{AccountId, CourseId, ExamId, ResultId, StudentId};
use crate::domains::exams::models::ExamType;

use super::grade::Grade;

/// A student's mark in one exam. The grade is always derived, never sent in.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ExamResult {
    pub id: ResultId,
    pub student_id: StudentId,
    pub exam_id: ExamId,
    pub marks_obtained: f64,
    pub grade: String,
    pub remarks: Option<String>,
    pub published_date: DateTime<Utc>,
    pub entered_by: Option<AccountId>,
}

/// Result with exam and student details for list views
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ResultListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub result: ExamResult,
    pub exam_name: String,
    pub exam_type: ExamType,
    pub total_marks: f64,
    pub course_id: CourseId,
    pub student_name: String,
    pub roll_number: String,
}

const LISTING_SELECT: &str = "SELECT
        r.*,
        e.exam_name,
        e.exam_type,
        e.total_marks,
        e.course_id,
        s.name AS student_name,
        s.roll_number
     FROM results r
     JOIN exams e ON e.id = r.exam_id
     JOIN students s ON s.id = r.student_id";

impl ExamResult {
    pub async fn find_by_id(id: ResultId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM results WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create(
        student_id: StudentId,
        exam_id: ExamId,
        marks_obtained: f64,
        grade: Grade,
        remarks: Option<&str>,
        entered_by: AccountId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO results (id, student_id, exam_id, marks_obtained, grade, remarks, entered_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(ResultId::new())
        .bind(student_id)
        .bind(exam_id)
        .bind(marks_obtained)
        .bind(grade.as_str())
        .bind(remarks)
        .bind(entered_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_marks(
        id: ResultId,
        marks_obtained: f64,
        grade: Grade,
        remarks: Option<&str>,
        entered_by: AccountId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE results
             SET
                marks_obtained = $2,
                grade = $3,
                remarks = COALESCE($4, remarks),
                entered_by = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(marks_obtained)
        .bind(grade.as_str())
        .bind(remarks)
        .bind(entered_by)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Latest published first
    pub async fn find_listings(
        student_id: Option<StudentId>,
        exam_id: Option<ExamId>,
        pool: &PgPool,
    ) -> Result<Vec<ResultListing>> {
        let sql = format!(
            "{}
             WHERE ($1::UUID IS NULL OR r.student_id = $1)
               AND ($2::UUID IS NULL OR r.exam_id = $2)
             ORDER BY r.published_date DESC",
            LISTING_SELECT
        );
        sqlx::query_as::<_, ResultListing>(&sql)
            .bind(student_id)
            .bind(exam_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
