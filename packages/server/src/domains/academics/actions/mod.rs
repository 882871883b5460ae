//! Course catalogue actions

use tracing::info;

use crate::common::error::is_unique_violation;
use crate::common::{
    Actor, ApiError, ApiResult, AuthError, Capability, CourseId, FacultyId, Role, StudentId,
};
use crate::domains::academics::models::{
    Course, CourseChanges, CourseListing, Faculty, NewCourse, Student,
};
use crate::kernel::ServerDeps;

// ============================================================================
// Caller scoping
// ============================================================================

/// The caller's own student record
pub async fn own_student(actor: Actor, deps: &ServerDeps) -> ApiResult<Student> {
    Student::find_by_account(actor.account_id(), &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Student profile"))
}

/// Student a write acts on: students always act on themselves, staff must
/// name one.
pub async fn resolve_student(
    actor: Actor,
    requested: Option<StudentId>,
    deps: &ServerDeps,
) -> ApiResult<StudentId> {
    match actor.role() {
        Role::Student => Ok(own_student(actor, deps).await?.id),
        _ => requested.ok_or_else(|| ApiError::bad_request("student_id is required")),
    }
}

/// Filter for list endpoints: students are pinned to their own record, staff
/// keep whatever filter they sent.
pub async fn scope_to_caller(
    actor: Actor,
    requested: Option<StudentId>,
    deps: &ServerDeps,
) -> ApiResult<Option<StudentId>> {
    match actor.role() {
        Role::Student => Ok(Some(own_student(actor, deps).await?.id)),
        _ => Ok(requested),
    }
}

/// Students may only read their own per-student views
pub async fn ensure_can_view_student(
    actor: Actor,
    student_id: StudentId,
    deps: &ServerDeps,
) -> ApiResult<()> {
    if actor.role() == Role::Student && own_student(actor, deps).await?.id != student_id {
        return Err(AuthError::PermissionDenied {
            role: Role::Student,
            action: "view another student's records",
        }
        .into());
    }
    Ok(())
}

// ============================================================================
// Courses
// ============================================================================

/// Active courses with their teaching faculty
pub async fn list_courses(deps: &ServerDeps) -> ApiResult<Vec<CourseListing>> {
    Ok(Course::find_active(&deps.db_pool).await?)
}

pub async fn get_course(course_id: CourseId, deps: &ServerDeps) -> ApiResult<Course> {
    Course::find_by_id(course_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Course"))
}

pub async fn create_course(
    new: NewCourse,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Course> {
    actor.can(Capability::ManageCourses).check()?;

    if new.course_code.trim().is_empty() || new.course_name.trim().is_empty() {
        return Err(ApiError::bad_request("course_code and course_name are required"));
    }
    validate_limits(Some(new.credits), new.max_students)?;
    ensure_faculty_exists(new.faculty_id, deps).await?;

    info!(course_code = %new.course_code, "Creating course");

    Course::create(&new, &deps.db_pool).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("Course code already exists")
        } else {
            ApiError::from(e)
        }
    })
}

pub async fn update_course(
    course_id: CourseId,
    changes: CourseChanges,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Course> {
    actor.can(Capability::EditCourses).check()?;
    validate_limits(changes.credits, changes.max_students)?;
    ensure_faculty_exists(changes.faculty_id, deps).await?;

    info!(course_id = %course_id, "Updating course");

    Course::update(course_id, &changes, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Course"))
}

/// Soft delete: the course disappears from listings and stops taking
/// enrollments, existing records keep pointing at it.
pub async fn delete_course(course_id: CourseId, actor: Actor, deps: &ServerDeps) -> ApiResult<Course> {
    actor.can(Capability::ManageCourses).check()?;

    info!(course_id = %course_id, "Deactivating course");

    Course::deactivate(course_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Course"))
}

async fn ensure_faculty_exists(faculty_id: Option<FacultyId>, deps: &ServerDeps) -> ApiResult<()> {
    let Some(faculty_id) = faculty_id else {
        return Ok(());
    };
    match Faculty::find_by_id(faculty_id, &deps.db_pool).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found("Faculty")),
    }
}

fn validate_limits(credits: Option<i32>, max_students: Option<i32>) -> ApiResult<()> {
    if matches!(credits, Some(c) if c <= 0) {
        return Err(ApiError::bad_request("credits must be positive"));
    }
    if matches!(max_students, Some(m) if m < 0) {
        return Err(ApiError::bad_request("max_students cannot be negative"));
    }
    Ok(())
}
