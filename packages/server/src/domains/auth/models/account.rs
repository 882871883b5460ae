use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgExecutor, PgPool};

use crate::common::utils::PasswordHash;
use crate::common::{AccountId, Role};

/// Account model - login credentials plus the role tag
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub async fn find_by_id(id: AccountId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Email lookup is case-insensitive, matching the unique index
    pub async fn find_by_email<'e>(
        email: &str,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Insert a new account, hashing the plaintext password
    pub async fn create<'e>(
        email: &str,
        password: &str,
        role: Role,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        let hashed = PasswordHash::generate(password);

        sqlx::query_as::<_, Self>(
            "INSERT INTO accounts (id, email, password_hash, password_salt, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(AccountId::new())
        .bind(email.trim())
        .bind(&hashed.hash)
        .bind(&hashed.salt)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        PasswordHash::verify(candidate, &self.password_hash, &self.password_salt)
    }
}
