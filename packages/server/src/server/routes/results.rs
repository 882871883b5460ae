use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, ExamId, ResultId, StudentId};
use crate::domains::results::actions::{self, EnterResult, UpdateResult};
use crate::domains::results::models::{ExamResult, ResultListing};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ResultFilter {
    pub student_id: Option<StudentId>,
    pub exam_id: Option<ExamId>,
}

pub async fn list_results_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Query(filter): Query<ResultFilter>,
) -> ApiResult<Json<Vec<ResultListing>>> {
    Ok(Json(
        actions::list_results(
            filter.student_id,
            filter.exam_id,
            user.actor(),
            &state.server_deps,
        )
        .await?,
    ))
}

pub async fn student_results_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(student_id): Path<StudentId>,
) -> ApiResult<Json<Vec<ResultListing>>> {
    Ok(Json(
        actions::student_results(student_id, user.actor(), &state.server_deps).await?,
    ))
}

pub async fn enter_result_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<EnterResult>,
) -> ApiResult<(StatusCode, Json<ExamResult>)> {
    let result = actions::enter_result(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn update_result_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<ResultId>,
    Json(body): Json<UpdateResult>,
) -> ApiResult<Json<ExamResult>> {
    Ok(Json(
        actions::update_result(id, body, user.actor(), &state.server_deps).await?,
    ))
}
