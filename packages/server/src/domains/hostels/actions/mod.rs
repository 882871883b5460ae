//! Hostel applications and allocations

use serde::Deserialize;
use tracing::info;

use crate::common::error::is_unique_violation;
use crate::common::{Actor, ApiError, ApiResult, Capability, HostelAllocationId, StudentId};
use crate::domains::academics::actions::{own_student, scope_to_caller};
use crate::domains::academics::models::Student;
use crate::domains::hostels::models::{
    AllocationChanges, HostelAllocation, HostelStatus, NewAllocation, RoomType, UNASSIGNED_ROOM,
};
use crate::kernel::ServerDeps;

const ALREADY_HOUSED: &str = "Student already has an active hostel allocation";

#[derive(Debug, Clone, Deserialize)]
pub struct HostelApplication {
    pub hostel_name: String,
    pub room_type: RoomType,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocateRoom {
    pub student_id: StudentId,
    pub hostel_name: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub remarks: Option<String>,
}

pub async fn list_allocations(
    student_id: Option<StudentId>,
    status: Option<HostelStatus>,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Vec<HostelAllocation>> {
    let student_id = scope_to_caller(actor, student_id, deps).await?;
    Ok(HostelAllocation::find_filtered(student_id, status, &deps.db_pool).await?)
}

/// Student asks for a room; an admin assigns the number later
pub async fn apply_for_hostel(
    application: HostelApplication,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<HostelAllocation> {
    let actor = actor.can(Capability::ApplyForHostel).check()?;
    let student = own_student(actor, deps).await?;

    info!(student_id = %student.id, hostel = %application.hostel_name, "Hostel application");

    insert_allocation(
        NewAllocation {
            student_id: student.id,
            hostel_name: application.hostel_name,
            room_number: UNASSIGNED_ROOM.to_string(),
            room_type: application.room_type,
            status: HostelStatus::Pending,
            remarks: application.remarks,
        },
        deps,
    )
    .await
}

pub async fn allocate_room(
    request: AllocateRoom,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<HostelAllocation> {
    actor.can(Capability::ManageHostels).check()?;

    if Student::find_by_id(request.student_id, &deps.db_pool)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Student"));
    }

    info!(
        student_id = %request.student_id,
        hostel = %request.hostel_name,
        room = %request.room_number,
        "Allocating hostel room"
    );

    insert_allocation(
        NewAllocation {
            student_id: request.student_id,
            hostel_name: request.hostel_name,
            room_number: request.room_number,
            room_type: request.room_type,
            status: HostelStatus::Allocated,
            remarks: request.remarks,
        },
        deps,
    )
    .await
}

pub async fn update_allocation(
    allocation_id: HostelAllocationId,
    changes: AllocationChanges,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<HostelAllocation> {
    actor.can(Capability::ManageHostels).check()?;

    info!(allocation_id = %allocation_id, status = ?changes.status, "Updating hostel allocation");

    HostelAllocation::update(allocation_id, &changes, &deps.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict(ALREADY_HOUSED)
            } else {
                ApiError::from(e)
            }
        })?
        .ok_or_else(|| ApiError::not_found("Hostel allocation"))
}

async fn insert_allocation(new: NewAllocation, deps: &ServerDeps) -> ApiResult<HostelAllocation> {
    if HostelAllocation::find_live_for_student(new.student_id, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(ALREADY_HOUSED));
    }

    HostelAllocation::create(&new, &deps.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict(ALREADY_HOUSED)
            } else {
                ApiError::from(e)
            }
        })
}
