//! Identity actions: register, login, me

use chrono::{Datelike, Utc};
use tracing::{info, warn};

use crate::common::error::is_unique_violation;
use crate::common::{AccountId, Actor, ApiError, ApiResult, AuthError, Capability, Role};
use crate::domains::academics::models::{Faculty, NewFaculty, NewStudent, Student};
use crate::domains::auth::models::Account;
use crate::domains::auth::types::{
    AccountView, AuthResponse, LoginRequest, MeResponse, Profile, ProfileInput, RegisterRequest,
};
use crate::kernel::ServerDeps;

const MIN_PASSWORD_LEN: usize = 6;

/// Create an account together with its role profile and sign it in.
///
/// Students may sign themselves up. Admin and faculty accounts are created by
/// a signed-in admin.
pub async fn register(
    request: RegisterRequest,
    caller: Option<Actor>,
    deps: &ServerDeps,
) -> ApiResult<AuthResponse> {
    if request.role != Role::Student {
        caller
            .ok_or(AuthError::AuthenticationRequired)?
            .can(Capability::RegisterStaff)
            .check()?;
    }

    let email = request.email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    let profile_input = ProfileInput::for_role(request.role, request.profile)?;

    info!(role = %request.role, "Registering account");

    let mut tx = deps.db_pool.begin().await?;

    if Account::find_by_email(&email, &mut *tx).await?.is_some() {
        return Err(ApiError::conflict("User already exists"));
    }

    let account = Account::create(&email, &request.password, request.role, &mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("User already exists")
            } else {
                ApiError::from(e)
            }
        })?;

    let profile = match profile_input {
        ProfileInput::None => Profile::None,
        ProfileInput::Student(input) => {
            let roll_number = deps
                .roll_numbers
                .next(Utc::now().year(), &mut *tx)
                .await?;
            let department = input
                .department
                .unwrap_or_else(|| Student::department_from_program(&input.program));

            let student = Student::create(
                &NewStudent {
                    account_id: account.id,
                    roll_number,
                    name: input.name,
                    date_of_birth: input.date_of_birth,
                    phone: input.phone,
                    address: input.address,
                    department,
                    program: input.program,
                    semester: input.semester.unwrap_or(1),
                },
                &mut *tx,
            )
            .await?;
            Profile::Student(student)
        }
        ProfileInput::Faculty(input) => {
            let faculty = Faculty::create(
                &NewFaculty {
                    account_id: account.id,
                    employee_id: input.employee_id,
                    name: input.name,
                    department: input.department,
                    designation: input.designation,
                    phone: input.phone,
                    specialization: input.specialization,
                },
                &mut *tx,
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::conflict("Employee id already registered")
                } else {
                    ApiError::from(e)
                }
            })?;
            Profile::Faculty(faculty)
        }
    };

    tx.commit().await?;

    info!(account_id = %account.id, role = %account.role, "Account registered");

    let token = deps
        .jwt_service
        .create_token(account.id, account.email.clone(), account.role)?;

    Ok(AuthResponse {
        token,
        user: AccountView::from(&account),
        profile,
    })
}

/// Exchange email and password for a token.
///
/// Unknown email and wrong password produce the same error.
pub async fn login(request: LoginRequest, deps: &ServerDeps) -> ApiResult<AuthResponse> {
    let account = match Account::find_by_email(&request.email, &deps.db_pool).await? {
        Some(account) if account.verify_password(&request.password) => account,
        _ => {
            warn!("Rejected login attempt");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = deps
        .jwt_service
        .create_token(account.id, account.email.clone(), account.role)?;
    let profile = load_profile(&account, deps).await?;

    info!(account_id = %account.id, "Login succeeded");

    Ok(AuthResponse {
        token,
        user: AccountView::from(&account),
        profile,
    })
}

/// Current account and its profile
pub async fn me(account_id: AccountId, deps: &ServerDeps) -> ApiResult<MeResponse> {
    let account = Account::find_by_id(account_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    let profile = load_profile(&account, deps).await?;

    Ok(MeResponse {
        user: AccountView::from(&account),
        profile,
    })
}

async fn load_profile(account: &Account, deps: &ServerDeps) -> ApiResult<Profile> {
    let profile = match account.role {
        Role::Admin => Profile::None,
        Role::Student => Student::find_by_account(account.id, &deps.db_pool)
            .await?
            .map(Profile::Student)
            .unwrap_or(Profile::None),
        Role::Faculty => Faculty::find_by_account(account.id, &deps.db_pool)
            .await?
            .map(Profile::Faculty)
            .unwrap_or(Profile::None),
    };
    Ok(profile)
}
