//! Alumni directory actions

use tracing::info;

use crate::common::error::is_unique_violation;
use crate::common::{Actor, AlumniId, ApiError, ApiResult, AuthError, Capability, Role};
use crate::domains::academics::actions::own_student;
use crate::domains::academics::models::{Student, StudentStatus};
use crate::domains::alumni::models::{Alumnus, AlumnusChanges, AlumnusListing, NewAlumnus};
use crate::kernel::ServerDeps;

pub async fn list_alumni(deps: &ServerDeps) -> ApiResult<Vec<AlumnusListing>> {
    Ok(Alumnus::find_listings(&deps.db_pool).await?)
}

pub async fn get_alumnus(alumni_id: AlumniId, deps: &ServerDeps) -> ApiResult<AlumnusListing> {
    Alumnus::find_listing(alumni_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Alumni record"))
}

/// Graduate a student into the alumni directory.
///
/// The student's status flips to graduated in the same transaction.
pub async fn create_alumnus(new: NewAlumnus, actor: Actor, deps: &ServerDeps) -> ApiResult<Alumnus> {
    actor.can(Capability::ManageAlumni).check()?;

    info!(student_id = %new.student_id, graduation_year = new.graduation_year, "Graduating student");

    let mut tx = deps.db_pool.begin().await?;

    Student::update_status(new.student_id, StudentStatus::Graduated, &mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Student"))?;

    let alumnus = Alumnus::create(&new, &mut *tx).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::conflict("Alumni record already exists for this student")
        } else {
            ApiError::from(e)
        }
    })?;

    tx.commit().await?;

    Ok(alumnus)
}

/// Admins edit any record; a graduate may edit their own
pub async fn update_alumnus(
    alumni_id: AlumniId,
    changes: AlumnusChanges,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Alumnus> {
    let existing = Alumnus::find_by_id(alumni_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Alumni record"))?;

    let allowed = match actor.role() {
        Role::Admin => true,
        Role::Student => own_student(actor, deps).await?.id == existing.student_id,
        Role::Faculty => false,
    };
    if !allowed {
        return Err(AuthError::PermissionDenied {
            role: actor.role(),
            action: "update this alumni profile",
        }
        .into());
    }

    info!(alumni_id = %alumni_id, "Updating alumni profile");

    Alumnus::update(alumni_id, &changes, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Alumni record"))
}
