//! Exam scheduling actions

use tracing::info;

use crate::common::{Actor, ApiError, ApiResult, Capability, CourseId, ExamId};
use crate::domains::academics::models::Course;
use crate::domains::exams::models::{Exam, ExamChanges, NewExam};
use crate::kernel::ServerDeps;

pub async fn list_exams(course_id: Option<CourseId>, deps: &ServerDeps) -> ApiResult<Vec<Exam>> {
    Ok(Exam::find_filtered(course_id, &deps.db_pool).await?)
}

pub async fn get_exam(exam_id: ExamId, deps: &ServerDeps) -> ApiResult<Exam> {
    Exam::find_by_id(exam_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Exam"))
}

pub async fn create_exam(new: NewExam, actor: Actor, deps: &ServerDeps) -> ApiResult<Exam> {
    let actor = actor.can(Capability::ManageExams).check()?;
    validate_exam(Some(new.total_marks), Some(new.duration))?;

    if new.exam_name.trim().is_empty() {
        return Err(ApiError::bad_request("exam_name is required"));
    }
    if Course::find_by_id(new.course_id, &deps.db_pool).await?.is_none() {
        return Err(ApiError::not_found("Course"));
    }

    info!(course_id = %new.course_id, exam_type = ?new.exam_type, "Creating exam");

    Ok(Exam::create(&new, actor.account_id(), &deps.db_pool).await?)
}

pub async fn update_exam(
    exam_id: ExamId,
    changes: ExamChanges,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Exam> {
    actor.can(Capability::ManageExams).check()?;
    validate_exam(changes.total_marks, changes.duration)?;

    info!(exam_id = %exam_id, "Updating exam");

    Exam::update(exam_id, &changes, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Exam"))
}

pub async fn delete_exam(exam_id: ExamId, actor: Actor, deps: &ServerDeps) -> ApiResult<()> {
    actor.can(Capability::DeleteExams).check()?;

    info!(exam_id = %exam_id, "Deleting exam");

    if Exam::delete(exam_id, &deps.db_pool).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("Exam"))
    }
}

fn validate_exam(total_marks: Option<f64>, duration: Option<i32>) -> ApiResult<()> {
    if let Some(total) = total_marks {
        if !total.is_finite() || total <= 0.0 {
            return Err(ApiError::bad_request("total_marks must be greater than zero"));
        }
    }
    if matches!(duration, Some(d) if d <= 0) {
        return Err(ApiError::bad_request("duration must be positive"));
    }
    Ok(())
}
