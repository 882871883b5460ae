//! Attendance actions

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::common::error::is_unique_violation;
use crate::common::{Actor, ApiError, ApiResult, Capability, CourseId, StudentId};
use crate::domains::academics::actions::{ensure_can_view_student, scope_to_caller};
use crate::domains::academics::models::{Course, Faculty, Student};
use crate::domains::attendance::models::{
    AttendanceRecord, AttendanceStats, AttendanceStatus, NewAttendance,
};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendance {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// Record one attendance entry; the calling faculty member is stored as marker.
pub async fn mark_attendance(
    request: MarkAttendance,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<AttendanceRecord> {
    let actor = actor.can(Capability::MarkAttendance).check()?;

    let faculty = Faculty::find_by_account(actor.account_id(), &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Faculty profile"))?;

    if Student::find_by_id(request.student_id, &deps.db_pool)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Student"));
    }
    if Course::find_by_id(request.course_id, &deps.db_pool)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Course"));
    }

    info!(
        student_id = %request.student_id,
        course_id = %request.course_id,
        date = %request.date,
        status = ?request.status,
        "Marking attendance"
    );

    let new = NewAttendance {
        student_id: request.student_id,
        course_id: request.course_id,
        date: request.date,
        status: request.status,
        marked_by: faculty.id,
        remarks: request.remarks,
    };

    AttendanceRecord::create(&new, &deps.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Attendance already marked for this date")
            } else {
                ApiError::from(e)
            }
        })
}

pub async fn list_attendance(
    student_id: Option<StudentId>,
    course_id: Option<CourseId>,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Vec<AttendanceRecord>> {
    let student_id = scope_to_caller(actor, student_id, deps).await?;
    Ok(AttendanceRecord::find_filtered(student_id, course_id, &deps.db_pool).await?)
}

pub async fn attendance_stats(
    student_id: StudentId,
    course_id: Option<CourseId>,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<AttendanceStats> {
    ensure_can_view_student(actor, student_id, deps).await?;

    if Student::find_by_id(student_id, &deps.db_pool).await?.is_none() {
        return Err(ApiError::not_found("Student"));
    }

    let counts = AttendanceRecord::count_by_status(student_id, course_id, &deps.db_pool).await?;
    Ok(AttendanceStats::from_counts(counts))
}
