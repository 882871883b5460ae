use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgExecutor, PgPool};

use crate::common::{AccountId, FacultyId};

/// Faculty profile linked to a faculty-role account
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub account_id: AccountId,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub phone: String,
    pub specialization: Option<String>,
    pub joining_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFaculty {
    pub account_id: AccountId,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub phone: String,
    pub specialization: Option<String>,
}

impl Faculty {
    pub async fn find_by_id(id: FacultyId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM faculty WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_account(account_id: AccountId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM faculty WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create<'e>(new: &NewFaculty, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO faculty (
                id,
                account_id,
                employee_id,
                name,
                department,
                designation,
                phone,
                specialization
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(FacultyId::new())
        .bind(new.account_id)
        .bind(&new.employee_id)
        .bind(&new.name)
        .bind(&new.department)
        .bind(&new.designation)
        .bind(&new.phone)
        .bind(&new.specialization)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }
}
