use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{HostelAllocationId, StudentId};

/// Room number recorded on an application before a room is assigned
pub const UNASSIGNED_ROOM: &str = "TBA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Triple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "hostel_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HostelStatus {
    Allocated,
    Pending,
    Vacated,
}

/// Hostel room held (or requested) by a student
///
/// A partial unique index allows one allocated-or-pending row per student;
/// vacated rows are history.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct HostelAllocation {
    pub id: HostelAllocationId,
    pub student_id: StudentId,
    pub hostel_name: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub allocation_date: DateTime<Utc>,
    pub status: HostelStatus,
    pub vacation_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAllocation {
    pub student_id: StudentId,
    pub hostel_name: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub status: HostelStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllocationChanges {
    pub hostel_name: Option<String>,
    pub room_number: Option<String>,
    pub room_type: Option<RoomType>,
    pub status: Option<HostelStatus>,
    pub remarks: Option<String>,
}

impl HostelAllocation {
    pub async fn find_filtered(
        student_id: Option<StudentId>,
        status: Option<HostelStatus>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM hostel_allocations
             WHERE ($1::UUID IS NULL OR student_id = $1)
               AND ($2::hostel_status IS NULL OR status = $2)
             ORDER BY allocation_date DESC",
        )
        .bind(student_id)
        .bind(status)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_live_for_student(
        student_id: StudentId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM hostel_allocations
             WHERE student_id = $1 AND status IN ('allocated', 'pending')",
        )
        .bind(student_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn create(new: &NewAllocation, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO hostel_allocations (
                id,
                student_id,
                hostel_name,
                room_number,
                room_type,
                status,
                remarks
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(HostelAllocationId::new())
        .bind(new.student_id)
        .bind(&new.hostel_name)
        .bind(&new.room_number)
        .bind(new.room_type)
        .bind(new.status)
        .bind(&new.remarks)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Moving to `vacated` stamps the vacation date
    pub async fn update(
        id: HostelAllocationId,
        changes: &AllocationChanges,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE hostel_allocations
             SET
                hostel_name = COALESCE($2, hostel_name),
                room_number = COALESCE($3, room_number),
                room_type = COALESCE($4, room_type),
                status = COALESCE($5, status),
                remarks = COALESCE($6, remarks),
                vacation_date = CASE
                    WHEN $5 = 'vacated'::hostel_status AND status <> 'vacated' THEN NOW()
                    ELSE vacation_date
                END
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.hostel_name)
        .bind(&changes.room_number)
        .bind(changes.room_type)
        .bind(changes.status)
        .bind(&changes.remarks)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
