use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};

use crate::common::{AlumniId, ApiResult};
use crate::domains::alumni::actions;
use crate::domains::alumni::models::{Alumnus, AlumnusChanges, AlumnusListing, NewAlumnus};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

pub async fn list_alumni_handler(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<AlumnusListing>>> {
    Ok(Json(actions::list_alumni(&state.server_deps).await?))
}

pub async fn get_alumnus_handler(
    Extension(state): Extension<AppState>,
    _user: AuthUser,
    Path(id): Path<AlumniId>,
) -> ApiResult<Json<AlumnusListing>> {
    Ok(Json(actions::get_alumnus(id, &state.server_deps).await?))
}

pub async fn create_alumnus_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<NewAlumnus>,
) -> ApiResult<(StatusCode, Json<Alumnus>)> {
    let alumnus = actions::create_alumnus(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(alumnus)))
}

pub async fn update_alumnus_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<AlumniId>,
    Json(body): Json<AlumnusChanges>,
) -> ApiResult<Json<Alumnus>> {
    Ok(Json(
        actions::update_alumnus(id, body, user.actor(), &state.server_deps).await?,
    ))
}
