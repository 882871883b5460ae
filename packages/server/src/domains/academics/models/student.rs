use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{AccountId, StudentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "student_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Enrolled,
    Graduated,
    Dropped,
}

/// Student record - one per admitted (or directly registered) student
///
/// `roll_number` is assigned once at creation and never rewritten.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Student {
    pub id: StudentId,
    pub account_id: AccountId,
    pub roll_number: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: String,
    pub department: String,
    pub program: String,
    pub semester: i32,
    pub admission_date: DateTime<Utc>,
    pub graduation_status: StudentStatus,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a student row
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub account_id: AccountId,
    pub roll_number: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: String,
    pub department: String,
    pub program: String,
    pub semester: i32,
}

impl Student {
    /// Department is the first word of the program, e.g. "Computer" for
    /// "Computer Science B.Tech".
    pub fn department_from_program(program: &str) -> String {
        program
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub async fn find_by_id(id: StudentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_account(account_id: AccountId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM students WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create<'e>(new: &NewStudent, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO students (
                id,
                account_id,
                roll_number,
                name,
                date_of_birth,
                phone,
                address,
                department,
                program,
                semester
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(StudentId::new())
        .bind(new.account_id)
        .bind(&new.roll_number)
        .bind(&new.name)
        .bind(new.date_of_birth)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(&new.department)
        .bind(&new.program)
        .bind(new.semester)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Returns None when the student does not exist
    pub async fn update_status<'e>(
        id: StudentId,
        status: StudentStatus,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE students SET graduation_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }
}
