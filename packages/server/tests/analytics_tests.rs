//! Integration tests for the admin dashboard.

mod common;

use crate::common::*;
use axum::http::StatusCode;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn dashboard_reports_every_section(ctx: &TestHarness) {
    let admin = create_admin(ctx).await;
    create_student(ctx).await;
    create_course(ctx, 10).await;

    let response = ctx.client_as(&admin).get("/api/analytics/dashboard").await;
    response.assert_status(StatusCode::OK);

    for key in [
        "total_students",
        "total_faculty",
        "total_courses",
        "pending_admissions",
        "total_alumni",
    ] {
        assert!(
            response.get(&format!("overview.{}", key)).is_i64(),
            "missing overview.{}",
            key
        );
    }
    assert!(response.get("overview.total_students").as_i64().unwrap() >= 1);
    assert!(response.get("overview.total_courses").as_i64().unwrap() >= 1);

    for key in [
        "recent_admissions",
        "department_wise_students",
        "fee_stats",
        "hostel_occupancy",
    ] {
        assert!(response.get(key).is_array(), "missing {}", key);
    }
    assert!(response.get("recent_admissions").as_array().unwrap().len() <= 5);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn dashboard_is_admin_only(ctx: &TestHarness) {
    let (student, _) = create_student(ctx).await;
    let (faculty, _) = create_faculty(ctx).await;

    ctx.client_as(&student)
        .get("/api/analytics/dashboard")
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.client_as(&faculty)
        .get("/api/analytics/dashboard")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
