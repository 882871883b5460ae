use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::AdmissionId;
use crate::domains::admissions::models::AdmissionStatus;
use crate::domains::fees::models::FeeStatus;
use crate::domains::hostels::models::HostelStatus;

#[derive(sqlx::FromRow, Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
pub struct Overview {
    /// Students still enrolled
    pub total_students: i64,
    pub total_faculty: i64,
    /// Active courses only
    pub total_courses: i64,
    pub pending_admissions: i64,
    pub total_alumni: i64,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct RecentAdmission {
    pub id: AdmissionId,
    pub applicant_name: String,
    pub program: String,
    pub status: AdmissionStatus,
    pub application_date: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct FeeStat {
    pub status: FeeStatus,
    pub total: Decimal,
    pub count: i64,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct HostelOccupancy {
    pub status: HostelStatus,
    pub count: i64,
}

/// Admin dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub overview: Overview,
    pub recent_admissions: Vec<RecentAdmission>,
    pub department_wise_students: Vec<DepartmentCount>,
    pub fee_stats: Vec<FeeStat>,
    pub hostel_occupancy: Vec<HostelOccupancy>,
}

const RECENT_ADMISSIONS_LIMIT: i64 = 5;

impl Dashboard {
    pub async fn overview(pool: &PgPool) -> Result<Overview> {
        sqlx::query_as::<_, Overview>(
            "SELECT
                (SELECT COUNT(*) FROM students WHERE graduation_status = 'enrolled') AS total_students,
                (SELECT COUNT(*) FROM faculty) AS total_faculty,
                (SELECT COUNT(*) FROM courses WHERE is_active = true) AS total_courses,
                (SELECT COUNT(*) FROM admissions WHERE status = 'pending') AS pending_admissions,
                (SELECT COUNT(*) FROM alumni) AS total_alumni",
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn recent_admissions(pool: &PgPool) -> Result<Vec<RecentAdmission>> {
        sqlx::query_as::<_, RecentAdmission>(
            "SELECT id, applicant_name, program, status, application_date
             FROM admissions
             ORDER BY application_date DESC
             LIMIT $1",
        )
        .bind(RECENT_ADMISSIONS_LIMIT)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Enrolled students per department, largest first
    pub async fn department_wise_students(pool: &PgPool) -> Result<Vec<DepartmentCount>> {
        sqlx::query_as::<_, DepartmentCount>(
            "SELECT department, COUNT(*) AS count
             FROM students
             WHERE graduation_status = 'enrolled'
             GROUP BY department
             ORDER BY count DESC, department",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn fee_stats(pool: &PgPool) -> Result<Vec<FeeStat>> {
        sqlx::query_as::<_, FeeStat>(
            "SELECT status, SUM(amount) AS total, COUNT(*) AS count
             FROM fees
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn hostel_occupancy(pool: &PgPool) -> Result<Vec<HostelOccupancy>> {
        sqlx::query_as::<_, HostelOccupancy>(
            "SELECT status, COUNT(*) AS count
             FROM hostel_allocations
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
