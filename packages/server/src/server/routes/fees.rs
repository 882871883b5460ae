use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, FeeId, StudentId};
use crate::domains::fees::actions::{self, PayFee, PaymentReceipt};
use crate::domains::fees::models::{Fee, FeeChanges, FeeStatus, NewFee, StudentFeeSummary};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct FeeFilter {
    pub student_id: Option<StudentId>,
    pub status: Option<FeeStatus>,
}

pub async fn list_fees_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Query(filter): Query<FeeFilter>,
) -> ApiResult<Json<Vec<Fee>>> {
    Ok(Json(
        actions::list_fees(filter.student_id, filter.status, user.actor(), &state.server_deps)
            .await?,
    ))
}

pub async fn student_fees_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(student_id): Path<StudentId>,
) -> ApiResult<Json<StudentFeeSummary>> {
    Ok(Json(
        actions::student_fee_summary(student_id, user.actor(), &state.server_deps).await?,
    ))
}

pub async fn create_fee_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<NewFee>,
) -> ApiResult<(StatusCode, Json<Fee>)> {
    let fee = actions::create_fee(body, user.actor(), &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(fee)))
}

pub async fn pay_fee_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Json(body): Json<PayFee>,
) -> ApiResult<Json<PaymentReceipt>> {
    Ok(Json(
        actions::pay_fee(body, user.actor(), &state.server_deps).await?,
    ))
}

pub async fn update_fee_handler(
    Extension(state): Extension<AppState>,
    user: AuthUser,
    Path(id): Path<FeeId>,
    Json(body): Json<FeeChanges>,
) -> ApiResult<Json<Fee>> {
    Ok(Json(
        actions::update_fee(id, body, user.actor(), &state.server_deps).await?,
    ))
}
