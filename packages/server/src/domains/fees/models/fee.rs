use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{FeeId, StudentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fee_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Tuition,
    Hostel,
    Exam,
    Library,
    Misc,
}

/// `Paid` is terminal. `Overdue` is set by the sweep and can still be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "fee_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl FeeStatus {
    pub fn is_outstanding(&self) -> bool {
        !matches!(self, FeeStatus::Paid)
    }
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Fee {
    pub id: FeeId,
    pub student_id: StudentId,
    pub fee_type: FeeType,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub semester: i32,
    pub academic_year: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFee {
    pub student_id: StudentId,
    pub fee_type: FeeType,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub semester: i32,
    pub academic_year: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeeChanges {
    pub fee_type: Option<FeeType>,
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<FeeStatus>,
    pub semester: Option<i32>,
    pub academic_year: Option<String>,
}

impl Fee {
    pub async fn find_by_id(id: FeeId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM fees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Latest due date first
    pub async fn find_filtered(
        student_id: Option<StudentId>,
        status: Option<FeeStatus>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM fees
             WHERE ($1::UUID IS NULL OR student_id = $1)
               AND ($2::fee_status IS NULL OR status = $2)
             ORDER BY due_date DESC, created_at DESC",
        )
        .bind(student_id)
        .bind(status)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn create(new: &NewFee, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO fees (id, student_id, fee_type, amount, due_date, semester, academic_year)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(FeeId::new())
        .bind(new.student_id)
        .bind(new.fee_type)
        .bind(new.amount)
        .bind(new.due_date)
        .bind(new.semester)
        .bind(&new.academic_year)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Apply admin edits. A paid fee never leaves `paid` through this path:
    /// the status change is ignored unless the row is still unpaid.
    pub async fn update(id: FeeId, changes: &FeeChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE fees
             SET
                fee_type = COALESCE($2, fee_type),
                amount = COALESCE($3, amount),
                due_date = COALESCE($4, due_date),
                status = CASE WHEN status = 'paid' THEN status ELSE COALESCE($5, status) END,
                semester = COALESCE($6, semester),
                academic_year = COALESCE($7, academic_year)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(changes.fee_type)
        .bind(changes.amount)
        .bind(changes.due_date)
        .bind(changes.status)
        .bind(changes.semester)
        .bind(&changes.academic_year)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Settle an unpaid fee.
    ///
    /// Returns None when the fee is missing or already paid; the status guard
    /// in the WHERE clause is what keeps two concurrent payments from both
    /// succeeding.
    pub async fn mark_paid(
        id: FeeId,
        payment_method: &str,
        transaction_id: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE fees
             SET
                status = 'paid',
                payment_date = NOW(),
                payment_method = $2,
                transaction_id = $3
             WHERE id = $1 AND status <> 'paid'
             RETURNING *",
        )
        .bind(id)
        .bind(payment_method)
        .bind(transaction_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Flag pending fees due before `today`. Returns how many changed.
    pub async fn mark_overdue(today: NaiveDate, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE fees SET status = 'overdue' WHERE status = 'pending' AND due_date < $1",
        )
        .bind(today)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
