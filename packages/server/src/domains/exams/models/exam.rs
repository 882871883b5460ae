use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AccountId, CourseId, ExamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "exam_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Midterm,
    Final,
    Quiz,
    Assignment,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Exam {
    pub id: ExamId,
    pub course_id: CourseId,
    pub exam_type: ExamType,
    pub exam_name: String,
    pub exam_date: DateTime<Utc>,
    /// Minutes
    pub duration: i32,
    pub total_marks: f64,
    pub venue: Option<String>,
    pub instructions: Option<String>,
    pub created_by: Option<AccountId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExam {
    pub course_id: CourseId,
    pub exam_type: ExamType,
    pub exam_name: String,
    pub exam_date: DateTime<Utc>,
    pub duration: i32,
    pub total_marks: f64,
    pub venue: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamChanges {
    pub exam_type: Option<ExamType>,
    pub exam_name: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub total_marks: Option<f64>,
    pub venue: Option<String>,
    pub instructions: Option<String>,
}

impl Exam {
    pub async fn find_by_id(id: ExamId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM exams WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Soonest first
    pub async fn find_filtered(course_id: Option<CourseId>, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM exams
             WHERE ($1::UUID IS NULL OR course_id = $1)
             ORDER BY exam_date ASC",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn create(new: &NewExam, created_by: AccountId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO exams (
                id,
                course_id,
                exam_type,
                exam_name,
                exam_date,
                duration,
                total_marks,
                venue,
                instructions,
                created_by
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(ExamId::new())
        .bind(new.course_id)
        .bind(new.exam_type)
        .bind(&new.exam_name)
        .bind(new.exam_date)
        .bind(new.duration)
        .bind(new.total_marks)
        .bind(&new.venue)
        .bind(&new.instructions)
        .bind(created_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: ExamId, changes: &ExamChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE exams
             SET
                exam_type = COALESCE($2, exam_type),
                exam_name = COALESCE($3, exam_name),
                exam_date = COALESCE($4, exam_date),
                duration = COALESCE($5, duration),
                total_marks = COALESCE($6, total_marks),
                venue = COALESCE($7, venue),
                instructions = COALESCE($8, instructions)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(changes.exam_type)
        .bind(&changes.exam_name)
        .bind(changes.exam_date)
        .bind(changes.duration)
        .bind(changes.total_marks)
        .bind(&changes.venue)
        .bind(&changes.instructions)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Results for the exam go with it
    pub async fn delete(id: ExamId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
