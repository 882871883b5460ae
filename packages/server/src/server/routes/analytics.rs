use axum::{extract::Extension, Json};

use crate::common::ApiResult;
use crate::domains::analytics::{actions, Dashboard};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

pub async fn dashboard_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(
        actions::dashboard(user.actor(), &state.server_deps).await?,
    ))
}
