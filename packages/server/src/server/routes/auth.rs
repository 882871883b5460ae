use axum::{extract::Extension, http::StatusCode, Json};

use crate::common::ApiResult;
use crate::domains::auth::actions;
use crate::domains::auth::types::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// Open to anonymous callers for student sign-up; staff roles need an admin token
pub async fn register_handler(
    Extension(state): Extension<AppState>,
    user: Option<AuthUser>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = actions::register(body, user.map(|u| u.actor()), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    Ok(Json(actions::login(body, &state.server_deps).await?))
}

pub async fn me_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> ApiResult<Json<MeResponse>> {
    Ok(Json(actions::me(user.account_id, &state.server_deps).await?))
}
