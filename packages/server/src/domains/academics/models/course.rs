use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{CourseId, FacultyId};

pub const DEFAULT_MAX_STUDENTS: i32 = 60;

/// Course - soft-deleted through `is_active`, never removed
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub credits: i32,
    pub semester: i32,
    pub faculty_id: Option<FacultyId>,
    pub description: Option<String>,
    pub max_students: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Course as listed to clients, with the teaching faculty's name joined in
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct CourseListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub course: Course,
    pub faculty_name: Option<String>,
    pub faculty_department: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub credits: i32,
    pub semester: i32,
    pub faculty_id: Option<FacultyId>,
    pub description: Option<String>,
    pub max_students: Option<i32>,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseChanges {
    pub course_name: Option<String>,
    pub department: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<i32>,
    pub faculty_id: Option<FacultyId>,
    pub description: Option<String>,
    pub max_students: Option<i32>,
}

impl Course {
    pub async fn find_by_id(id: CourseId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Lock an active course row for the rest of the transaction
    ///
    /// Enrollment holds this lock across its capacity check and insert so two
    /// requests cannot both take the last seat.
    pub async fn lock_active(id: CourseId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM courses WHERE id = $1 AND is_active = true FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_active(pool: &PgPool) -> Result<Vec<CourseListing>> {
        sqlx::query_as::<_, CourseListing>(
            "SELECT c.*, f.name AS faculty_name, f.department AS faculty_department
             FROM courses c
             LEFT JOIN faculty f ON f.id = c.faculty_id
             WHERE c.is_active = true
             ORDER BY c.course_code",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn create(new: &NewCourse, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO courses (
                id,
                course_code,
                course_name,
                department,
                credits,
                semester,
                faculty_id,
                description,
                max_students
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(CourseId::new())
        .bind(new.course_code.trim())
        .bind(&new.course_name)
        .bind(&new.department)
        .bind(new.credits)
        .bind(new.semester)
        .bind(new.faculty_id)
        .bind(&new.description)
        .bind(new.max_students.unwrap_or(DEFAULT_MAX_STUDENTS))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: CourseId, changes: &CourseChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE courses
             SET
                course_name = COALESCE($2, course_name),
                department = COALESCE($3, department),
                credits = COALESCE($4, credits),
                semester = COALESCE($5, semester),
                faculty_id = COALESCE($6, faculty_id),
                description = COALESCE($7, description),
                max_students = COALESCE($8, max_students)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.course_name)
        .bind(&changes.department)
        .bind(changes.credits)
        .bind(changes.semester)
        .bind(changes.faculty_id)
        .bind(&changes.description)
        .bind(changes.max_students)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Soft delete
    pub async fn deactivate(id: CourseId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("UPDATE courses SET is_active = false WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
