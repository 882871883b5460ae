use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{AccountId, AdmissionId, StudentId};

/// Application status
///
/// Approval provisions the student in the same step, so a reviewed-and-approved
/// application is stored as `Enrolled`. `Approved` stays a valid value for
/// rows written by older tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "admission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Enrolled,
}

/// Admission application
///
/// `merit_rank` is a snapshot taken at submission; it is never recomputed
/// when later applications arrive.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Admission {
    pub id: AdmissionId,
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub program: String,
    pub previous_institution: Option<String>,
    pub previous_percentage: Option<f64>,
    pub previous_year: Option<i32>,
    pub entrance_score: f64,
    pub merit_rank: i32,
    pub status: AdmissionStatus,
    pub application_date: DateTime<Utc>,
    pub reviewed_by: Option<AccountId>,
    pub review_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub student_id: Option<StudentId>,
}

/// Fields supplied by the applicant
#[derive(Debug, Clone)]
pub struct NewAdmission {
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub program: String,
    pub previous_institution: Option<String>,
    pub previous_percentage: Option<f64>,
    pub previous_year: Option<i32>,
    pub entrance_score: f64,
}

impl Admission {
    /// Insert an application and stamp its merit rank in the same statement.
    ///
    /// Rank = 1 + applications already in the program with a strictly higher
    /// entrance score. Ties share a rank.
    pub async fn submit(new: &NewAdmission, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO admissions (
                id,
                applicant_name,
                email,
                phone,
                date_of_birth,
                address,
                program,
                previous_institution,
                previous_percentage,
                previous_year,
                entrance_score,
                merit_rank
             )
             VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                (SELECT COUNT(*) + 1
                 FROM admissions
                 WHERE program = $7 AND entrance_score > $11)::INTEGER
             )
             RETURNING *",
        )
        .bind(AdmissionId::new())
        .bind(&new.applicant_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(new.date_of_birth)
        .bind(&new.address)
        .bind(&new.program)
        .bind(&new.previous_institution)
        .bind(new.previous_percentage)
        .bind(new.previous_year)
        .bind(new.entrance_score)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: AdmissionId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM admissions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Newest applications first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM admissions ORDER BY application_date DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Lock the application row for a review decision
    pub async fn lock(id: AdmissionId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM admissions WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }

    pub async fn record_rejection(
        id: AdmissionId,
        reviewed_by: AccountId,
        remarks: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE admissions
             SET
                status = 'rejected',
                reviewed_by = $2,
                review_date = NOW(),
                remarks = $3
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(reviewed_by)
        .bind(remarks)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Approval and enrollment collapse into one transition
    pub async fn record_enrollment(
        id: AdmissionId,
        reviewed_by: AccountId,
        remarks: Option<&str>,
        student_id: StudentId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE admissions
             SET
                status = 'enrolled',
                reviewed_by = $2,
                review_date = NOW(),
                remarks = $3,
                student_id = $4
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(reviewed_by)
        .bind(remarks)
        .bind(student_id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }
}
