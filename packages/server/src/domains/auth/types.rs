//! Identity payloads and the role-resolved profile

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{AccountId, ApiError, Role};
use crate::domains::academics::models::{Faculty, Student};

use super::models::Account;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Shape depends on `role`; see [`ProfileInput::for_role`]
    #[serde(default)]
    pub profile: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentProfileInput {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: String,
    pub program: String,
    pub department: Option<String>,
    pub semester: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FacultyProfileInput {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub phone: String,
    pub specialization: Option<String>,
}

/// Registration profile after it has been matched against the role
#[derive(Debug, Clone)]
pub enum ProfileInput {
    Student(StudentProfileInput),
    Faculty(FacultyProfileInput),
    None,
}

impl ProfileInput {
    /// Students and faculty must send a profile; admins have none.
    pub fn for_role(role: Role, raw: Option<serde_json::Value>) -> Result<Self, ApiError> {
        let parse_err = |e: serde_json::Error| {
            ApiError::bad_request(format!("Invalid {} profile: {}", role, e))
        };

        match (role, raw) {
            (Role::Admin, _) => Ok(ProfileInput::None),
            (_, None) => Err(ApiError::bad_request(format!(
                "A {} profile is required",
                role
            ))),
            (Role::Student, Some(raw)) => serde_json::from_value(raw)
                .map(ProfileInput::Student)
                .map_err(parse_err),
            (Role::Faculty, Some(raw)) => serde_json::from_value(raw)
                .map(ProfileInput::Faculty)
                .map_err(parse_err),
        }
    }
}

/// Stored profile for an account, `null` for admins
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Student(Student),
    Faculty(Faculty),
    None,
}

/// Account fields safe to hand back to clients
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountView,
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: AccountView,
    pub profile: Profile,
}
