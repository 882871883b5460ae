//! Roll number allocation.
//!
//! Roll numbers look like `AMU20260042`: institution prefix, admission year,
//! then a per-year counter padded to four digits. The counter lives in
//! `roll_number_counters` and is bumped with a single upsert, so two approvals
//! can never draw the same value. The unique index on `students.roll_number`
//! is the second line of defence.

use anyhow::{Context, Result};
use sqlx::PgExecutor;

#[derive(Debug, Clone)]
pub struct RollNumberSequence {
    prefix: String,
}

impl RollNumberSequence {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Draw the next roll number for `year`.
    ///
    /// Run this inside the transaction that creates the student so that a
    /// rolled-back approval gives its number back.
    pub async fn next<'e>(&self, year: i32, executor: impl PgExecutor<'e>) -> Result<String> {
        let value: i32 = sqlx::query_scalar(
            "INSERT INTO roll_number_counters (year, last_value)
             VALUES ($1, 1)
             ON CONFLICT (year)
             DO UPDATE SET last_value = roll_number_counters.last_value + 1
             RETURNING last_value",
        )
        .bind(year)
        .fetch_one(executor)
        .await
        .context("Failed to advance roll number counter")?;

        Ok(format_roll_number(&self.prefix, year, value))
    }
}

/// Past 9999 in a year the suffix simply grows a digit.
pub fn format_roll_number(prefix: &str, year: i32, sequence: i32) -> String {
    format!("{}{}{:04}", prefix, year, sequence)
}

/// Initial password handed to a freshly provisioned student account
pub fn initial_password(prefix: &str, roll_number: &str) -> String {
    format!("{}@{}", prefix, roll_number)
}
