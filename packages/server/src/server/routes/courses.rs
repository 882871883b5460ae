use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};

use crate::common::{ApiResult, CourseId};
use crate::domains::academics::actions;
use crate::domains::academics::models::{Course, CourseChanges, CourseListing, NewCourse};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

pub async fn list_courses_handler(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<CourseListing>>> {
    Ok(Json(actions::list_courses(&state.server_deps).await?))
}

pub async fn get_course_handler(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
    Path(id): Path<CourseId>,
) -> ApiResult<Json<Course>> {
    Ok(Json(actions::get_course(id, &state.server_deps).await?))
}

pub async fn create_course_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<NewCourse>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let course = actions::create_course(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<CourseId>,
    Json(body): Json<CourseChanges>,
) -> ApiResult<Json<Course>> {
    Ok(Json(
        actions::update_course(id, body, user.actor(), &state.server_deps).await?,
    ))
}

pub async fn delete_course_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<CourseId>,
) -> ApiResult<Json<Course>> {
    Ok(Json(
        actions::delete_course(id, user.actor(), &state.server_deps).await?,
    ))
}
