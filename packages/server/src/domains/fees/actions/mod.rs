//! Fee actions: raising fees, mock payment and the overdue sweep

use chrono::{NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{Actor, ApiError, ApiResult, Capability, FeeId, Role, StudentId};
use crate::domains::academics::actions::{ensure_can_view_student, own_student, scope_to_caller};
use crate::domains::academics::models::Student;
use crate::domains::fees::models::{Fee, FeeChanges, FeeStatus, NewFee, StudentFeeSummary};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Deserialize)]
pub struct PayFee {
    pub fee_id: FeeId,
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub message: String,
    pub transaction_id: String,
    pub fee: Fee,
}

/// Informational reference, not a uniqueness key
pub fn generate_transaction_id() -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("TXN{}{}", Utc::now().timestamp_millis(), suffix)
}

pub async fn list_fees(
    student_id: Option<StudentId>,
    status: Option<FeeStatus>,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Vec<Fee>> {
    let student_id = scope_to_caller(actor, student_id, deps).await?;
    Ok(Fee::find_filtered(student_id, status, &deps.db_pool).await?)
}

pub async fn student_fee_summary(
    student_id: StudentId,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<StudentFeeSummary> {
    ensure_can_view_student(actor, student_id, deps).await?;

    let fees = Fee::find_filtered(Some(student_id), None, &deps.db_pool).await?;
    Ok(StudentFeeSummary::from_fees(fees))
}

pub async fn create_fee(new: NewFee, actor: Actor, deps: &ServerDeps) -> ApiResult<Fee> {
    actor.can(Capability::ManageFees).check()?;

    if new.amount < Decimal::ZERO {
        return Err(ApiError::bad_request("amount cannot be negative"));
    }
    if Student::find_by_id(new.student_id, &deps.db_pool)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Student"));
    }

    info!(student_id = %new.student_id, fee_type = ?new.fee_type, amount = %new.amount, "Creating fee");

    Ok(Fee::create(&new, &deps.db_pool).await?)
}

pub async fn update_fee(
    fee_id: FeeId,
    changes: FeeChanges,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Fee> {
    actor.can(Capability::ManageFees).check()?;

    if matches!(changes.amount, Some(a) if a < Decimal::ZERO) {
        return Err(ApiError::bad_request("amount cannot be negative"));
    }

    let existing = Fee::find_by_id(fee_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Fee"))?;
    if existing.status == FeeStatus::Paid && matches!(changes.status, Some(s) if s != FeeStatus::Paid)
    {
        return Err(ApiError::conflict("A paid fee cannot be reopened"));
    }

    info!(fee_id = %fee_id, "Updating fee");

    Fee::update(fee_id, &changes, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Fee"))
}

/// Mock payment. Pending and overdue fees can be paid exactly once.
pub async fn pay_fee(request: PayFee, actor: Actor, deps: &ServerDeps) -> ApiResult<PaymentReceipt> {
    let fee = Fee::find_by_id(request.fee_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Fee"))?;

    if actor.role() == Role::Student && own_student(actor, deps).await?.id != fee.student_id {
        return Err(ApiError::not_found("Fee"));
    }
    if request.payment_method.trim().is_empty() {
        return Err(ApiError::bad_request("payment_method is required"));
    }

    let transaction_id = generate_transaction_id();

    let paid = Fee::mark_paid(
        request.fee_id,
        request.payment_method.trim(),
        &transaction_id,
        &deps.db_pool,
    )
    .await?
    .ok_or_else(|| ApiError::conflict("Fee already paid"))?;

    info!(
        fee_id = %paid.id,
        transaction_id = %transaction_id,
        amount = %paid.amount,
        "Fee paid"
    );

    Ok(PaymentReceipt {
        message: "Payment successful".to_string(),
        transaction_id,
        fee: paid,
    })
}

/// Flag every pending fee whose due date is before `today`
pub async fn sweep_overdue_fees(today: NaiveDate, deps: &ServerDeps) -> anyhow::Result<u64> {
    let updated = Fee::mark_overdue(today, &deps.db_pool).await?;
    if updated > 0 {
        info!(updated, %today, "Marked fees overdue");
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_ids_carry_prefix_and_digits() {
        let id = generate_transaction_id();
        assert!(id.starts_with("TXN"));
        assert!(id.len() > "TXN".len() + 12);
        assert!(id["TXN".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn only_paid_is_settled() {
        assert!(FeeStatus::Pending.is_outstanding());
        assert!(FeeStatus::Overdue.is_outstanding());
        assert!(!FeeStatus::Paid.is_outstanding());
    }
}
