//! Admission workflow actions
//!
//! Submission is public. Review is admin-only and, on approval, provisions
//! the student's account and record in the same transaction that closes the
//! application.

use chrono::{Datelike, Utc};
use tracing::info;

use crate::common::error::is_unique_violation;
use crate::common::{Actor, AdmissionId, ApiError, ApiResult, Capability, Role};
use crate::domains::academics::models::{NewStudent, Student};
use crate::domains::admissions::models::{Admission, AdmissionStatus};
use crate::domains::admissions::types::{ReviewApplication, ReviewDecision, SubmitApplication};
use crate::domains::auth::models::Account;
use crate::kernel::{initial_password, ServerDeps};

/// Accept a new application and snapshot its merit rank
pub async fn submit_application(
    application: SubmitApplication,
    deps: &ServerDeps,
) -> ApiResult<Admission> {
    let new = application.validate()?;

    info!(program = %new.program, score = new.entrance_score, "Submitting admission application");

    let admission = Admission::submit(&new, &deps.db_pool).await?;

    info!(
        admission_id = %admission.id,
        merit_rank = admission.merit_rank,
        "Admission application received"
    );

    Ok(admission)
}

/// All applications, newest first
pub async fn list_applications(actor: Actor, deps: &ServerDeps) -> ApiResult<Vec<Admission>> {
    actor.can(Capability::ReviewAdmissions).check()?;

    Ok(Admission::find_all(&deps.db_pool).await?)
}

/// Applicants track their application by id, so any signed-in caller may read one
pub async fn get_application(admission_id: AdmissionId, deps: &ServerDeps) -> ApiResult<Admission> {
    Admission::find_by_id(admission_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Admission"))
}

/// Approve or reject a pending application.
///
/// The application row stays locked from the status check until commit, so
/// concurrent reviews serialise and only the first one can act. Approval
/// creates the student account (password derived from the roll number) and
/// the student record; any failure rolls the whole decision back.
pub async fn review_application(
    admission_id: AdmissionId,
    review: ReviewApplication,
    actor: Actor,
    deps: &ServerDeps,
) -> ApiResult<Admission> {
    let actor = actor.can(Capability::ReviewAdmissions).check()?;
    let remarks = review.remarks.as_deref();

    info!(
        admission_id = %admission_id,
        decision = ?review.status,
        reviewed_by = %actor.account_id(),
        "Reviewing admission application"
    );

    let mut tx = deps.db_pool.begin().await?;

    let admission = Admission::lock(admission_id, &mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Admission"))?;

    if admission.status != AdmissionStatus::Pending {
        return Err(ApiError::conflict("Application already reviewed"));
    }

    let reviewed = match review.status {
        ReviewDecision::Rejected => {
            Admission::record_rejection(admission_id, actor.account_id(), remarks, &mut *tx)
                .await?
        }
        ReviewDecision::Approved => {
            if Account::find_by_email(&admission.email, &mut *tx)
                .await?
                .is_some()
            {
                return Err(ApiError::conflict(
                    "An account already exists for this applicant's email",
                ));
            }

            let year = Utc::now().year();
            let roll_number = deps.roll_numbers.next(year, &mut *tx).await?;
            let password = initial_password(deps.roll_numbers.prefix(), &roll_number);

            let account = Account::create(&admission.email, &password, Role::Student, &mut *tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        ApiError::conflict("An account already exists for this applicant's email")
                    } else {
                        ApiError::from(e)
                    }
                })?;

            let student = Student::create(
                &NewStudent {
                    account_id: account.id,
                    roll_number: roll_number.clone(),
                    name: admission.applicant_name.clone(),
                    date_of_birth: admission.date_of_birth,
                    phone: admission.phone.clone(),
                    address: admission.address.clone(),
                    department: Student::department_from_program(&admission.program),
                    program: admission.program.clone(),
                    semester: 1,
                },
                &mut *tx,
            )
            .await?;

            info!(
                admission_id = %admission_id,
                student_id = %student.id,
                roll_number = %roll_number,
                "Student provisioned from admission"
            );

            Admission::record_enrollment(
                admission_id,
                actor.account_id(),
                remarks,
                student.id,
                &mut *tx,
            )
            .await?
        }
    };

    tx.commit().await?;

    Ok(reviewed)
}
