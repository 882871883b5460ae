use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{AlumniId, StudentId};

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Alumnus {
    pub id: AlumniId,
    pub student_id: StudentId,
    pub graduation_year: i32,
    pub degree: String,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub linkedin_profile: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub achievements: Vec<String>,
    pub willing_to_mentor: bool,
    pub updated_at: DateTime<Utc>,
}

/// Alumni record with the student's academic identity
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct AlumnusListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub alumnus: Alumnus,
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub program: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAlumnus {
    pub student_id: StudentId,
    pub graduation_year: i32,
    pub degree: String,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub linkedin_profile: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub willing_to_mentor: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlumnusChanges {
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub linkedin_profile: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub willing_to_mentor: Option<bool>,
}

const LISTING_SELECT: &str = "SELECT a.*, s.name, s.roll_number, s.department, s.program
     FROM alumni a
     JOIN students s ON s.id = a.student_id";

impl Alumnus {
    pub async fn find_by_id(id: AlumniId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM alumni WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_listing(id: AlumniId, pool: &PgPool) -> Result<Option<AlumnusListing>> {
        let sql = format!("{} WHERE a.id = $1", LISTING_SELECT);
        sqlx::query_as::<_, AlumnusListing>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Most recent graduates first
    pub async fn find_listings(pool: &PgPool) -> Result<Vec<AlumnusListing>> {
        let sql = format!("{} ORDER BY a.graduation_year DESC, s.name", LISTING_SELECT);
        sqlx::query_as::<_, AlumnusListing>(&sql)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create<'e>(new: &NewAlumnus, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO alumni (
                id,
                student_id,
                graduation_year,
                degree,
                current_position,
                current_company,
                location,
                linkedin_profile,
                email,
                phone,
                achievements,
                willing_to_mentor
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *",
        )
        .bind(AlumniId::new())
        .bind(new.student_id)
        .bind(new.graduation_year)
        .bind(&new.degree)
        .bind(&new.current_position)
        .bind(&new.current_company)
        .bind(&new.location)
        .bind(&new.linkedin_profile)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.achievements)
        .bind(new.willing_to_mentor)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn update(id: AlumniId, changes: &AlumnusChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE alumni
             SET
                current_position = COALESCE($2, current_position),
                current_company = COALESCE($3, current_company),
                location = COALESCE($4, location),
                linkedin_profile = COALESCE($5, linkedin_profile),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone),
                achievements = COALESCE($8, achievements),
                willing_to_mentor = COALESCE($9, willing_to_mentor),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.current_position)
        .bind(&changes.current_company)
        .bind(&changes.location)
        .bind(&changes.linkedin_profile)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.achievements)
        .bind(changes.willing_to_mentor)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
