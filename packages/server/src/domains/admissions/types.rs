//! Request payloads for the admission workflow

use chrono::NaiveDate;
use serde::Deserialize;

use crate::common::ApiError;

use super::models::NewAdmission;

#[derive(Debug, Clone, Deserialize)]
pub struct PreviousEducation {
    pub institution: Option<String>,
    pub percentage: Option<f64>,
    pub year: Option<i32>,
}

/// Public application form
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplication {
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub program: String,
    #[serde(default)]
    pub previous_education: Option<PreviousEducation>,
    pub entrance_score: f64,
}

impl SubmitApplication {
    /// Check the form and normalise it into an insertable row
    pub fn validate(self) -> Result<NewAdmission, ApiError> {
        let required = [
            ("applicant_name", &self.applicant_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("program", &self.program),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ApiError::bad_request(format!("{} is required", field)));
        }
        if !self.email.contains('@') {
            return Err(ApiError::bad_request("email is not valid"));
        }
        if !self.entrance_score.is_finite() || self.entrance_score < 0.0 {
            return Err(ApiError::bad_request(
                "entrance_score must be a non-negative number",
            ));
        }

        let previous = self.previous_education.unwrap_or(PreviousEducation {
            institution: None,
            percentage: None,
            year: None,
        });

        Ok(NewAdmission {
            applicant_name: self.applicant_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            date_of_birth: self.date_of_birth,
            address: self.address.trim().to_string(),
            program: self.program.trim().to_string(),
            previous_institution: previous.institution,
            previous_percentage: previous.percentage,
            previous_year: previous.year,
            entrance_score: self.entrance_score,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

/// Admin review body: `{"status": "approved" | "rejected", "remarks": ...}`
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewApplication {
    #[serde(alias = "decision")]
    pub status: ReviewDecision,
    pub remarks: Option<String>,
}
