use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, CourseId, StudentId};
use crate::domains::attendance::actions::{self, MarkAttendance};
use crate::domains::attendance::{AttendanceRecord, AttendanceStats};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct AttendanceFilter {
    pub student_id: Option<StudentId>,
    pub course_id: Option<CourseId>,
}

#[derive(Debug, Deserialize)]
pub struct StatsFilter {
    pub course_id: Option<CourseId>,
}

pub async fn list_attendance_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Query(filter): Query<AttendanceFilter>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    Ok(Json(
        actions::list_attendance(
            filter.student_id,
            filter.course_id,
            user.actor(),
            &state.server_deps,
        )
        .await?,
    ))
}

pub async fn mark_attendance_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<MarkAttendance>,
) -> ApiResult<(StatusCode, Json<AttendanceRecord>)> {
    let record = actions::mark_attendance(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn attendance_stats_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(student_id): Path<StudentId>,
    Query(filter): Query<StatsFilter>,
) -> ApiResult<Json<AttendanceStats>> {
    Ok(Json(
        actions::attendance_stats(student_id, filter.course_id, user.actor(), &state.server_deps)
            .await?,
    ))
}
