//! Integration tests for hostel allocation and the alumni directory.

mod common;

use crate::common::*;
use axum::http::StatusCode;
use serde_json::json;
use test_context::test_context;

// =============================================================================
// Hostels
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn application_is_pending_until_a_room_is_assigned(ctx: &TestHarness) {
    let (account, student) = create_student(ctx).await;
    let admin = create_admin(ctx).await;

    let applied = ctx
        .client_as(&account)
        .post(
            "/api/hostels/apply",
            json!({ "hostel_name": "Sir Ziauddin Hall", "room_type": "double" }),
        )
        .await;
    applied.assert_status(StatusCode::CREATED);
    assert_eq!(applied.str("status"), "pending");
    assert_eq!(applied.str("room_number"), "TBA");
    assert_eq!(applied.str("student_id"), student.id.to_string());

    let again = ctx
        .client_as(&account)
        .post(
            "/api/hostels/apply",
            json!({ "hostel_name": "Aftab Hall", "room_type": "single" }),
        )
        .await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.error(), "Student already has an active hostel allocation");

    let assigned = ctx
        .client_as(&admin)
        .put(
            &format!("/api/hostels/{}", applied.str("id")),
            json!({ "room_number": "B-114", "status": "allocated" }),
        )
        .await;
    assigned.assert_status(StatusCode::OK);
    assert_eq!(assigned.str("room_number"), "B-114");
    assert_eq!(assigned.str("status"), "allocated");

    // Vacating frees the student to apply again
    let vacated = ctx
        .client_as(&admin)
        .put(
            &format!("/api/hostels/{}", applied.str("id")),
            json!({ "status": "vacated" }),
        )
        .await;
    vacated.assert_status(StatusCode::OK);
    assert!(!vacated.get("vacation_date").is_null());

    ctx.client_as(&account)
        .post(
            "/api/hostels/apply",
            json!({ "hostel_name": "Aftab Hall", "room_type": "single" }),
        )
        .await
        .assert_status(StatusCode::CREATED);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_students_apply_for_hostels(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;

    ctx.client_as(&admin)
        .post(
            "/api/hostels/apply",
            json!({ "hostel_name": "Aftab Hall", "room_type": "single" }),
        )
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

// =============================================================================
// Alumni
// =============================================================================

fn alumni_body(student_id: impl ToString) -> serde_json::Value {
    json!({
        "student_id": student_id.to_string(),
        "graduation_year": 2026,
        "degree": "B.Tech Computer Engineering",
        "current_company": "Example Labs",
        "achievements": ["Gold medal"],
        "willing_to_mentor": true
    })
}

#[test_context(TestHarness)]
#[tokio::test]
async fn graduating_a_student_creates_one_alumni_record(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;
    let (_, student) = create_student(ctx).await;
    let client = ctx.client_as(&admin);

    let created = client.post("/api/alumni", alumni_body(student.id)).await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(created.get("achievements"), &json!(["Gold medal"]));

    let status: String =
        sqlx::query_scalar("SELECT graduation_status::TEXT FROM students WHERE id = $1")
            .bind(student.id)
            .fetch_one(&ctx.db_pool)
            .await
            .unwrap();
    assert_eq!(status, "graduated");

    let again = client.post("/api/alumni", alumni_body(student.id)).await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.error(), "Alumni record already exists for this student");

    let listing = client
        .get(&format!("/api/alumni/{}", created.str("id")))
        .await;
    listing.assert_status(StatusCode::OK);
    assert_eq!(listing.str("roll_number"), student.roll_number);
    assert_eq!(listing.str("degree"), "B.Tech Computer Engineering");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn graduates_edit_only_their_own_record(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;
    let (graduate, student) = create_student(ctx).await;
    let (stranger, _) = create_student(ctx).await;

    let created = ctx
        .client_as(&admin)
        .post("/api/alumni", alumni_body(student.id))
        .await;
    let path = format!("/api/alumni/{}", created.str("id"));

    let own = ctx
        .client_as(&graduate)
        .put(&path, json!({ "current_position": "Engineer" }))
        .await;
    own.assert_status(StatusCode::OK);
    assert_eq!(own.str("current_position"), "Engineer");
    assert_eq!(own.str("current_company"), "Example Labs");

    ctx.client_as(&stranger)
        .put(&path, json!({ "current_position": "Impostor" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_student_cannot_graduate(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;

    ctx.client_as(&admin)
        .post("/api/alumni", alumni_body(uuid::Uuid::now_v7()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
