use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, EnrollmentId, StudentId};
use crate::domains::enrollments::actions::{self, EnrollRequest};
use crate::domains::enrollments::models::{Enrollment, EnrollmentListing};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct EnrollmentFilter {
    pub student_id: Option<StudentId>,
}

pub async fn list_enrollments_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Query(filter): Query<EnrollmentFilter>,
) -> ApiResult<Json<Vec<EnrollmentListing>>> {
    Ok(Json(
        actions::list_enrollments(filter.student_id, user.actor(), &state.server_deps).await?,
    ))
}

pub async fn enroll_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<EnrollRequest>,
) -> ApiResult<(StatusCode, Json<Enrollment>)> {
    let enrollment = actions::enroll(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub async fn drop_enrollment_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<EnrollmentId>,
) -> ApiResult<Json<Enrollment>> {
    Ok(Json(
        actions::drop_enrollment(id, user.actor(), &state.server_deps).await?,
    ))
}
