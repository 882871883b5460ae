use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, CourseId, ExamId};
use crate::domains::exams::actions;
use crate::domains::exams::models::{Exam, ExamChanges, NewExam};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ExamFilter {
    pub course_id: Option<CourseId>,
}

pub async fn list_exams_handler(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
    Query(filter): Query<ExamFilter>,
) -> ApiResult<Json<Vec<Exam>>> {
    Ok(Json(
        actions::list_exams(filter.course_id, &state.server_deps).await?,
    ))
}

pub async fn get_exam_handler(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
    Path(id): Path<ExamId>,
) -> ApiResult<Json<Exam>> {
    Ok(Json(actions::get_exam(id, &state.server_deps).await?))
}

pub async fn create_exam_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<NewExam>,
) -> ApiResult<(StatusCode, Json<Exam>)> {
    let exam = actions::create_exam(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

pub async fn update_exam_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<ExamId>,
    Json(body): Json<ExamChanges>,
) -> ApiResult<Json<Exam>> {
    Ok(Json(
        actions::update_exam(id, body, user.actor(), &state.server_deps).await?,
    ))
}

pub async fn delete_exam_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<ExamId>,
) -> ApiResult<StatusCode> {
    actions::delete_exam(id, user.actor(), &state.server_deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
