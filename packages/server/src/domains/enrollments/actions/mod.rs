//! Enrollment actions
//!
//! Enrolling runs as one transaction holding the course row lock, so the
//! duplicate check, the capacity count and the insert see a stable course.

use serde::Deserialize;
use tracing::info;

use crate::common::error::is_unique_violation;
use crate::common::{Actor, ApiError, ApiResult, CourseId, EnrollmentId, Role, StudentId};
use crate::domains::academics::actions::{own_student, resolve_student, scope_to_caller};
use crate::domains::academics::models::{Course, Student};
use crate::domains::enrollments::models::{Enrollment, EnrollmentListing};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    /// Ignored for students, who always enroll themselves
    pub student_id: Option<StudentId>,
    pub course_id: CourseId,
    pub semester: i32,
    pub academic_year: String,
}

pub async fn enroll(request: EnrollRequest, actor: Actor, deps: &ServerDeps) -> ApiResult<Enrollment> {
    let student_id = resolve_student(actor, request.student_id, deps).await?;
    let course_id = request.course_id;

    if Student::find_by_id(student_id, &deps.db_pool).await?.is_none() {
        return Err(ApiError::not_found("Student"));
    }

    info!(
        student_id = %student_id,
        course_id = %course_id,
        semester = request.semester,
        "Enrolling student"
    );

    let mut tx = deps.db_pool.begin().await?;

    if Enrollment::find_existing(student_id, course_id, request.semester, &mut *tx)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("Already enrolled in this course"));
    }

    let course = Course::lock_active(course_id, &mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Course"))?;

    let active = Enrollment::count_active(course_id, &mut *tx).await?;
    if !has_free_seat(active, course.max_students) {
        info!(course_id = %course_id, active, max = course.max_students, "Course is full");
        return Err(ApiError::conflict("Course is full"));
    }

    let enrollment = Enrollment::create(
        student_id,
        course_id,
        request.semester,
        &request.academic_year,
        &mut *tx,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("Already enrolled in this course")
        } else {
            ApiError::from(e)
        }
    })?;

    tx.commit().await?;

    Ok(enrollment)
}

/// Mark an enrollment dropped; students may only drop their own
pub async fn drop_enrollment(
    enrollment_id: EnrollmentId,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Enrollment> {
    let existing = Enrollment::find_by_id(enrollment_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Enrollment"))?;

    if actor.role() == Role::Student && own_student(actor, deps).await?.id != existing.student_id {
        return Err(ApiError::not_found("Enrollment"));
    }

    info!(enrollment_id = %enrollment_id, "Dropping enrollment");

    Enrollment::drop_enrollment(enrollment_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Enrollment"))
}

pub async fn list_enrollments(
    student_id: Option<StudentId>,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Vec<EnrollmentListing>> {
    let student_id = scope_to_caller(actor, student_id, deps).await?;
    Ok(Enrollment::find_listings(student_id, &deps.db_pool).await?)
}

fn has_free_seat(active: i64, max_students: i32) -> bool {
    active < i64::from(max_students)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_seat_is_free_until_taken() {
        assert!(has_free_seat(59, 60));
        assert!(!has_free_seat(60, 60));
    }

    #[test]
    fn zero_capacity_course_never_has_seats() {
        assert!(!has_free_seat(0, 0));
    }
}
