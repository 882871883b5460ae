//! Integration tests for the admission workflow.
//!
//! - submission snapshots a merit rank within the program
//! - approval provisions the account and student record in one step
//! - a reviewed application cannot be reviewed again

mod common;

use crate::common::*;
use axum::http::StatusCode;
use campus_core::common::Role;
use serde_json::json;
use test_context::test_context;

// =============================================================================
// Submission
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn merit_rank_counts_strictly_higher_scores_in_program(ctx: &TestHarness) {
    let client = ctx.client();
    let program = unique("Physics B.Sc");

    let first = client
        .post("/api/admissions", application_body(&unique_email("a"), &program, 80.0))
        .await;
    first.assert_status(StatusCode::CREATED);
    assert_eq!(first.get("merit_rank"), &json!(1));
    assert_eq!(first.str("status"), "pending");

    let higher = client
        .post("/api/admissions", application_body(&unique_email("b"), &program, 90.0))
        .await;
    assert_eq!(higher.get("merit_rank"), &json!(1));

    let middle = client
        .post("/api/admissions", application_body(&unique_email("c"), &program, 85.0))
        .await;
    assert_eq!(middle.get("merit_rank"), &json!(2));

    let tie = client
        .post("/api/admissions", application_body(&unique_email("d"), &program, 80.0))
        .await;
    assert_eq!(tie.get("merit_rank"), &json!(3));

    // Other programs do not compete
    let elsewhere = client
        .post(
            "/api/admissions",
            application_body(&unique_email("e"), &unique("Law LLB"), 10.0),
        )
        .await;
    assert_eq!(elsewhere.get("merit_rank"), &json!(1));

    // Ranks are snapshots: the first applicant keeps rank 1
    let admin = create_admin(ctx).await;
    let reread = ctx
        .client_as(&admin)
        .get(&format!("/api/admissions/{}", first.str("id")))
        .await;
    reread.assert_status(StatusCode::OK);
    assert_eq!(reread.get("merit_rank"), &json!(1));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_application_is_a_bad_request(ctx: &TestHarness) {
    let client = ctx.client();

    let negative = client
        .post(
            "/api/admissions",
            application_body(&unique_email("neg"), "Chemistry B.Sc", -5.0),
        )
        .await;
    negative.assert_status(StatusCode::BAD_REQUEST);

    let no_program = client
        .post("/api/admissions", application_body(&unique_email("np"), "  ", 50.0))
        .await;
    no_program.assert_status(StatusCode::BAD_REQUEST);
    assert!(no_program.error().contains("program"));
}

// =============================================================================
// Review
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn approval_provisions_student_account_and_record(ctx: &TestHarness) {
    let email = unique_email("applicant");
    let submitted = ctx
        .client()
        .post(
            "/api/admissions",
            application_body(&email, "Computer Science B.Tech", 77.5),
        )
        .await;
    let id = submitted.str("id").to_string();

    let admin = create_admin(ctx).await;
    let reviewed = ctx
        .client_as(&admin)
        .put(
            &format!("/api/admissions/{}/approve", id),
            json!({ "status": "approved", "remarks": "Welcome" }),
        )
        .await;
    reviewed.assert_status(StatusCode::OK);
    assert_eq!(reviewed.str("status"), "enrolled");
    assert_eq!(reviewed.str("reviewed_by"), admin.id.to_string());
    assert_eq!(reviewed.str("remarks"), "Welcome");
    let student_id = reviewed.str("student_id").to_string();

    // The new student can sign in with the roll-number password
    let student: (String, String, String) = sqlx::query_as(
        "SELECT roll_number, department, graduation_status::TEXT FROM students WHERE id = $1::UUID",
    )
    .bind(&student_id)
    .fetch_one(&ctx.db_pool)
    .await
    .unwrap();
    let (roll_number, department, status) = student;

    assert!(roll_number.starts_with(TEST_PREFIX));
    assert_eq!(roll_number.len(), TEST_PREFIX.len() + 8);
    assert_eq!(department, "Computer");
    assert_eq!(status, "enrolled");

    let login = ctx
        .client()
        .post(
            "/api/auth/login",
            json!({ "email": email, "password": format!("{}@{}", TEST_PREFIX, roll_number) }),
        )
        .await;
    login.assert_status(StatusCode::OK);
    assert_eq!(login.str("user.role"), "student");
    assert_eq!(login.str("profile.id"), student_id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn second_approval_conflicts_and_creates_nothing(ctx: &TestHarness) {
    let email = unique_email("twice");
    let submitted = ctx
        .client()
        .post("/api/admissions", application_body(&email, "Mathematics B.Sc", 66.0))
        .await;
    let path = format!("/api/admissions/{}/approve", submitted.str("id"));

    let admin = create_admin(ctx).await;
    let client = ctx.client_as(&admin);

    client
        .put(&path, json!({ "status": "approved" }))
        .await
        .assert_status(StatusCode::OK);

    let again = client.put(&path, json!({ "status": "approved" })).await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.error(), "Application already reviewed");

    assert_eq!(ctx.account_count(&email).await, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejection_records_reviewer_and_creates_no_account(ctx: &TestHarness) {
    let email = unique_email("rejected");
    let submitted = ctx
        .client()
        .post("/api/admissions", application_body(&email, "History B.A", 31.0))
        .await;

    let admin = create_admin(ctx).await;
    let reviewed = ctx
        .client_as(&admin)
        .put(
            &format!("/api/admissions/{}/approve", submitted.str("id")),
            json!({ "decision": "rejected", "remarks": "Below cutoff" }),
        )
        .await;

    reviewed.assert_status(StatusCode::OK);
    assert_eq!(reviewed.str("status"), "rejected");
    assert_eq!(reviewed.str("remarks"), "Below cutoff");
    assert!(reviewed.get("student_id").is_null());
    assert!(!reviewed.get("review_date").is_null());
    assert_eq!(ctx.account_count(&email).await, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approval_conflicts_when_email_already_has_account(ctx: &TestHarness) {
    let existing = create_account(ctx, Role::Faculty).await;
    let submitted = ctx
        .client()
        .post(
            "/api/admissions",
            application_body(&existing.email, "English B.A", 70.0),
        )
        .await;

    let admin = create_admin(ctx).await;
    let reviewed = ctx
        .client_as(&admin)
        .put(
            &format!("/api/admissions/{}/approve", submitted.str("id")),
            json!({ "status": "approved" }),
        )
        .await;
    reviewed.assert_status(StatusCode::CONFLICT);

    // Rolled back: still pending and reviewable
    let reread = ctx
        .client_as(&admin)
        .get(&format!("/api/admissions/{}", submitted.str("id")))
        .await;
    assert_eq!(reread.str("status"), "pending");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn review_of_unknown_application_is_not_found(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;
    let response = ctx
        .client_as(&admin)
        .put(
            &format!("/api/admissions/{}/approve", uuid::Uuid::now_v7()),
            json!({ "status": "approved" }),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Admission not found");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_admins_review_applications(ctx: &TestHarness) {
    let submitted = ctx
        .client()
        .post(
            "/api/admissions",
            application_body(&unique_email("gate"), "Geography B.A", 55.0),
        )
        .await;
    let (faculty, _) = create_faculty(ctx).await;

    let response = ctx
        .client_as(&faculty)
        .put(
            &format!("/api/admissions/{}/approve", submitted.str("id")),
            json!({ "status": "approved" }),
        )
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let listing = ctx.client_as(&faculty).get("/api/admissions").await;
    listing.assert_status(StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn simultaneous_approvals_provision_one_student(ctx: &TestHarness) {
    let email = unique_email("race");
    let submitted = ctx
        .client()
        .post("/api/admissions", application_body(&email, "Statistics B.Sc", 81.0))
        .await;
    let path = format!("/api/admissions/{}/approve", submitted.str("id"));

    let admin = create_admin(ctx).await;
    let client = ctx.client_as(&admin);

    let (a, b) = tokio::join!(
        client.put(&path, json!({ "status": "approved" })),
        client.put(&path, json!({ "status": "approved" })),
    );

    let mut statuses = [a.status, b.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
    let loser = if a.status == StatusCode::CONFLICT { &a } else { &b };
    assert_eq!(loser.error(), "Application already reviewed");

    assert_eq!(ctx.account_count(&email).await, 1);
    let students: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM students s JOIN accounts a ON a.id = s.account_id WHERE LOWER(a.email) = LOWER($1)",
    )
    .bind(&email)
    .fetch_one(&ctx.db_pool)
    .await
    .unwrap();
    assert_eq!(students, 1);
}
