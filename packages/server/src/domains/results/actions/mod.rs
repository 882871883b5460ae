//! Result entry and lookup

use serde::Deserialize;
use tracing::info;

use crate::common::error::is_unique_violation;
use crate::common::{Actor, ApiError, ApiResult, Capability, ExamId, ResultId, StudentId};
use crate::domains::academics::actions::{ensure_can_view_student, scope_to_caller};
use crate::domains::academics::models::Student;
use crate::domains::exams::models::Exam;
use crate::domains::results::models::{ExamResult, Grade, ResultListing};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Deserialize)]
pub struct EnterResult {
    pub student_id: StudentId,
    pub exam_id: ExamId,
    pub marks_obtained: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResult {
    pub marks_obtained: f64,
    pub remarks: Option<String>,
}

pub async fn enter_result(
    request: EnterResult,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<ExamResult> {
    let actor = actor.can(Capability::EnterResults).check()?;

    let exam = Exam::find_by_id(request.exam_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Exam"))?;
    validate_marks(request.marks_obtained, exam.total_marks)?;

    if Student::find_by_id(request.student_id, &deps.db_pool)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Student"));
    }

    let grade = Grade::from_marks(request.marks_obtained, exam.total_marks);

    info!(
        exam_id = %exam.id,
        student_id = %request.student_id,
        grade = %grade,
        "Entering result"
    );

    ExamResult::create(
        request.student_id,
        exam.id,
        request.marks_obtained,
        grade,
        request.remarks.as_deref(),
        actor.account_id(),
        &deps.db_pool,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("Result already exists for this exam")
        } else {
            ApiError::from(e)
        }
    })
}

/// Correct a mark; the grade is recomputed against the exam's total
pub async fn update_result(
    result_id: ResultId,
    request: UpdateResult,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<ExamResult> {
    let actor = actor.can(Capability::EnterResults).check()?;

    let existing = ExamResult::find_by_id(result_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Result"))?;
    let exam = Exam::find_by_id(existing.exam_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Exam"))?;
    validate_marks(request.marks_obtained, exam.total_marks)?;

    let grade = Grade::from_marks(request.marks_obtained, exam.total_marks);

    info!(result_id = %result_id, grade = %grade, "Updating result");

    ExamResult::update_marks(
        result_id,
        request.marks_obtained,
        grade,
        request.remarks.as_deref(),
        actor.account_id(),
        &deps.db_pool,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Result"))
}

pub async fn list_results(
    student_id: Option<StudentId>,
    exam_id: Option<ExamId>,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Vec<ResultListing>> {
    let student_id = scope_to_caller(actor, student_id, deps).await?;
    Ok(ExamResult::find_listings(student_id, exam_id, &deps.db_pool).await?)
}

pub async fn student_results(
    student_id: StudentId,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Vec<ResultListing>> {
    ensure_can_view_student(actor, student_id, deps).await?;
    Ok(ExamResult::find_listings(Some(student_id), None, &deps.db_pool).await?)
}

fn validate_marks(marks_obtained: f64, total_marks: f64) -> ApiResult<()> {
    if !marks_obtained.is_finite() || marks_obtained < 0.0 {
        return Err(ApiError::bad_request("marks_obtained must be a non-negative number"));
    }
    if marks_obtained > total_marks {
        return Err(ApiError::bad_request(format!(
            "marks_obtained cannot exceed the exam total of {}",
            total_marks
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_marks_are_accepted() {
        assert!(validate_marks(100.0, 100.0).is_ok());
        assert!(validate_marks(0.0, 100.0).is_ok());
    }

    #[test]
    fn marks_outside_the_range_are_rejected() {
        assert!(validate_marks(100.5, 100.0).is_err());
        assert!(validate_marks(-1.0, 100.0).is_err());
        assert!(validate_marks(f64::NAN, 100.0).is_err());
    }
}
