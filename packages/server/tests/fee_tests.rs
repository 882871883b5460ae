//! Integration tests for fee payment and the overdue sweep.

mod common;

use crate::common::*;
use axum::http::StatusCode;
use campus_core::domains::fees::actions::sweep_overdue_fees;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use test_context::test_context;

fn pay_body(fee_id: impl ToString) -> serde_json::Value {
    json!({ "fee_id": fee_id.to_string(), "payment_method": "upi" })
}

#[test_context(TestHarness)]
#[tokio::test]
async fn fee_is_paid_exactly_once(ctx: &TestHarness) {
    let (account, student) = create_student(ctx).await;
    let due = Utc::now().date_naive() + Duration::days(30);
    let fee = create_fee(ctx, student.id, Decimal::new(1500000, 2), due).await;
    let client = ctx.client_as(&account);

    let paid = client.post("/api/fees/pay", pay_body(fee.id)).await;
    paid.assert_status(StatusCode::OK);
    assert_eq!(paid.str("message"), "Payment successful");
    assert_eq!(paid.str("fee.status"), "paid");
    assert_eq!(paid.str("fee.payment_method"), "upi");

    let transaction_id = paid.str("transaction_id");
    assert!(transaction_id.starts_with("TXN"));
    assert_eq!(paid.str("fee.transaction_id"), transaction_id);
    assert!(!paid.get("fee.payment_date").is_null());

    let again = client.post("/api/fees/pay", pay_body(fee.id)).await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.error(), "Fee already paid");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_fee_is_not_found(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;

    let response = ctx
        .client_as(&admin)
        .post("/api/fees/pay", pay_body(uuid::Uuid::now_v7()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Fee not found");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn students_cannot_pay_other_students_fees(ctx: &TestHarness) {
    let (account, _) = create_student(ctx).await;
    let (_, other) = create_student(ctx).await;
    let due = Utc::now().date_naive() + Duration::days(30);
    let fee = create_fee(ctx, other.id, Decimal::new(2000, 0), due).await;

    ctx.client_as(&account)
        .post("/api/fees/pay", pay_body(fee.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn overdue_sweep_flags_past_due_fees_which_stay_payable(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;
    let (_, student) = create_student(ctx).await;
    let today = Utc::now().date_naive();
    let late = create_fee(ctx, student.id, Decimal::new(800, 0), today - Duration::days(3)).await;
    let upcoming = create_fee(ctx, student.id, Decimal::new(900, 0), today + Duration::days(3)).await;

    let updated = sweep_overdue_fees(today, &ctx.deps).await.unwrap();
    assert!(updated >= 1);

    let client = ctx.client_as(&admin);
    let overdue = client
        .get(&format!("/api/fees?student_id={}&status=overdue", student.id))
        .await;
    overdue.assert_status(StatusCode::OK);
    let overdue = overdue.body.as_array().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0]["id"], json!(late.id.to_string()));

    let pending = client
        .get(&format!("/api/fees?student_id={}&status=pending", student.id))
        .await;
    assert_eq!(pending.body[0]["id"], json!(upcoming.id.to_string()));

    let paid = client.post("/api/fees/pay", pay_body(late.id)).await;
    paid.assert_status(StatusCode::OK);
    assert_eq!(paid.str("fee.status"), "paid");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn summary_splits_outstanding_and_paid(ctx: &TestHarness) {
    let (account, student) = create_student(ctx).await;
    let today = Utc::now().date_naive();
    let first = create_fee(ctx, student.id, Decimal::new(1000, 0), today + Duration::days(10)).await;
    create_fee(ctx, student.id, Decimal::new(250, 0), today + Duration::days(20)).await;
    create_fee(ctx, student.id, Decimal::new(500, 0), today - Duration::days(1)).await;
    sweep_overdue_fees(today, &ctx.deps).await.unwrap();

    let client = ctx.client_as(&account);
    client
        .post("/api/fees/pay", pay_body(first.id))
        .await
        .assert_status(StatusCode::OK);

    let summary = client
        .get(&format!("/api/fees/student/{}", student.id))
        .await;
    summary.assert_status(StatusCode::OK);
    assert_eq!(summary.get("fees").as_array().unwrap().len(), 3);
    assert_eq!(summary.get("total_pending").as_f64(), Some(750.0));
    assert_eq!(summary.get("total_paid").as_f64(), Some(1000.0));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn paid_fee_cannot_be_reopened(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;
    let (_, student) = create_student(ctx).await;
    let due = Utc::now().date_naive() + Duration::days(5);
    let fee = create_fee(ctx, student.id, Decimal::new(300, 0), due).await;
    let client = ctx.client_as(&admin);

    client
        .post("/api/fees/pay", pay_body(fee.id))
        .await
        .assert_status(StatusCode::OK);

    let reopened = client
        .put(&format!("/api/fees/{}", fee.id), json!({ "status": "pending" }))
        .await;
    reopened.assert_status(StatusCode::CONFLICT);
    assert_eq!(reopened.error(), "A paid fee cannot be reopened");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn simultaneous_payments_settle_once(ctx: &TestHarness) {
    let (account, student) = create_student(ctx).await;
    let due = Utc::now().date_naive() + Duration::days(30);
    let fee = create_fee(ctx, student.id, Decimal::new(4200, 0), due).await;
    let client = ctx.client_as(&account);

    let (a, b) = tokio::join!(
        client.post("/api/fees/pay", pay_body(fee.id)),
        client.post("/api/fees/pay", pay_body(fee.id)),
    );

    let mut statuses = [a.status, b.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    let winner = if a.status == StatusCode::OK { &a } else { &b };
    let stored: Option<String> =
        sqlx::query_scalar("SELECT transaction_id FROM fees WHERE id = $1")
            .bind(fee.id)
            .fetch_one(&ctx.db_pool)
            .await
            .unwrap();
    assert_eq!(stored.as_deref(), Some(winner.str("transaction_id")));
}
