//! Integration tests for attendance marking and statistics.

mod common;

use crate::common::*;
use axum::http::StatusCode;
use serde_json::json;
use test_context::test_context;

fn mark_body(
    student_id: impl ToString,
    course_id: impl ToString,
    date: &str,
    status: &str,
) -> serde_json::Value {
    json!({
        "student_id": student_id.to_string(),
        "course_id": course_id.to_string(),
        "date": date,
        "status": status
    })
}

#[test_context(TestHarness)]
#[tokio::test]
async fn one_mark_per_student_course_and_day(ctx: &TestHarness) {
    let (faculty_account, faculty) = create_faculty(ctx).await;
    let (_, student) = create_student(ctx).await;
    let course = create_course(ctx, 10).await;
    let client = ctx.client_as(&faculty_account);

    let first = client
        .post(
            "/api/attendance/mark",
            mark_body(student.id, course.id, "2026-09-01", "present"),
        )
        .await;
    first.assert_status(StatusCode::CREATED);
    assert_eq!(first.str("marked_by"), faculty.id.to_string());

    let again = client
        .post(
            "/api/attendance/mark",
            mark_body(student.id, course.id, "2026-09-01", "absent"),
        )
        .await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.error(), "Attendance already marked for this date");

    client
        .post(
            "/api/attendance/mark",
            mark_body(student.id, course.id, "2026-09-02", "absent"),
        )
        .await
        .assert_status(StatusCode::CREATED);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_faculty_mark_attendance(ctx: &TestHarness) {
    let (account, student) = create_student(ctx).await;
    let course = create_course(ctx, 10).await;

    let response = ctx
        .client_as(&account)
        .post(
            "/api/attendance/mark",
            mark_body(student.id, course.id, "2026-09-01", "present"),
        )
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn stats_count_late_as_attended(ctx: &TestHarness) {
    let (faculty_account, _) = create_faculty(ctx).await;
    let (student_account, student) = create_student(ctx).await;
    let course = create_course(ctx, 10).await;
    let faculty = ctx.client_as(&faculty_account);

    for (date, status) in [
        ("2026-09-01", "present"),
        ("2026-09-02", "late"),
        ("2026-09-03", "absent"),
        ("2026-09-04", "present"),
        ("2026-09-05", "absent"),
        ("2026-09-06", "absent"),
    ] {
        faculty
            .post(
                "/api/attendance/mark",
                mark_body(student.id, course.id, date, status),
            )
            .await
            .assert_status(StatusCode::CREATED);
    }

    let stats = ctx
        .client_as(&student_account)
        .get(&format!("/api/attendance/stats/{}", student.id))
        .await;
    stats.assert_status(StatusCode::OK);
    assert_eq!(stats.get("total"), &json!(6));
    assert_eq!(stats.get("present"), &json!(2));
    assert_eq!(stats.get("late"), &json!(1));
    assert_eq!(stats.get("absent"), &json!(3));
    assert_eq!(stats.get("percentage").as_f64(), Some(50.0));

    // Filtered to a course with no marks
    let other = create_course(ctx, 10).await;
    let empty = ctx
        .client_as(&faculty_account)
        .get(&format!(
            "/api/attendance/stats/{}?course_id={}",
            student.id, other.id
        ))
        .await;
    empty.assert_status(StatusCode::OK);
    assert_eq!(empty.get("total"), &json!(0));
    assert_eq!(empty.get("percentage").as_f64(), Some(0.0));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn students_only_see_their_own_stats(ctx: &TestHarness) {
    let (account, _) = create_student(ctx).await;
    let (_, other) = create_student(ctx).await;

    let response = ctx
        .client_as(&account)
        .get(&format!("/api/attendance/stats/{}", other.id))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_student_or_course_is_not_found(ctx: &TestHarness) {
    let (faculty_account, _) = create_faculty(ctx).await;
    let (_, student) = create_student(ctx).await;
    let course = create_course(ctx, 10).await;
    let client = ctx.client_as(&faculty_account);

    let no_student = client
        .post(
            "/api/attendance/mark",
            mark_body(uuid::Uuid::now_v7(), course.id, "2026-09-01", "present"),
        )
        .await;
    no_student.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(no_student.error(), "Student not found");

    let no_course = client
        .post(
            "/api/attendance/mark",
            mark_body(student.id, uuid::Uuid::now_v7(), "2026-09-01", "present"),
        )
        .await;
    no_course.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(no_course.error(), "Course not found");
}
