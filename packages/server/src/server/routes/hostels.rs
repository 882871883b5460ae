use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, HostelAllocationId, StudentId};
use crate::domains::hostels::actions::{self, AllocateRoom, HostelApplication};
use crate::domains::hostels::models::{AllocationChanges, HostelAllocation, HostelStatus};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct AllocationFilter {
    pub student_id: Option<StudentId>,
    pub status: Option<HostelStatus>,
}

pub async fn list_allocations_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Query(filter): Query<AllocationFilter>,
) -> ApiResult<Json<Vec<HostelAllocation>>> {
    Ok(Json(
        actions::list_allocations(filter.student_id, filter.status, user.actor(), &state.server_deps)
            .await?,
    ))
}

pub async fn apply_for_hostel_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<HostelApplication>,
) -> ApiResult<(StatusCode, Json<HostelAllocation>)> {
    let allocation = actions::apply_for_hostel(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(allocation)))
}

pub async fn allocate_room_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<AllocateRoom>,
) -> ApiResult<(StatusCode, Json<HostelAllocation>)> {
    let allocation = actions::allocate_room(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(allocation)))
}

pub async fn update_allocation_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<HostelAllocationId>,
    Json(body): Json<AllocationChanges>,
) -> ApiResult<Json<HostelAllocation>> {
    Ok(Json(
        actions::update_allocation(id, body, user.actor(), &state.server_deps).await?,
    ))
}
