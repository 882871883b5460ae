use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};

use crate::common::{AdmissionId, ApiResult};
use crate::domains::admissions::actions;
use crate::domains::admissions::types::{ReviewApplication, SubmitApplication};
use crate::domains::admissions::Admission;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

pub async fn submit_application_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<SubmitApplication>,
) -> ApiResult<(StatusCode, Json<Admission>)> {
    let admission = actions::submit_application(body, &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(admission)))
}

pub async fn list_applications_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Admission>>> {
    Ok(Json(
        actions::list_applications(user.actor(), &state.server_deps).await?,
    ))
}

pub async fn get_application_handler(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
    Path(id): Path<AdmissionId>,
) -> ApiResult<Json<Admission>> {
    Ok(Json(actions::get_application(id, &state.server_deps).await?))
}

pub async fn review_application_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<AdmissionId>,
    Json(body): Json<ReviewApplication>,
) -> ApiResult<Json<Admission>> {
    Ok(Json(
        actions::review_application(id, body, user.actor(), &state.server_deps).await?,
    ))
}
