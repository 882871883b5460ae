//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use campus_core::common::{AccountId, CourseId, Role, StudentId};
use campus_core::domains::academics::models::{
    Course, Faculty, NewCourse, NewFaculty, NewStudent, Student,
};
use campus_core::domains::auth::Account;
use campus_core::domains::exams::models::{Exam, ExamType, NewExam};
use campus_core::domains::fees::models::{Fee, FeeType, NewFee};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use super::TestHarness;

pub const TEST_PASSWORD: &str = "password123";

/// Short random tag to keep rows from different tests apart
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}@amu.test", unique(prefix))
}

pub async fn create_account(ctx: &TestHarness, role: Role) -> Account {
    Account::create(
        &unique_email(role.as_str()),
        TEST_PASSWORD,
        role,
        &ctx.db_pool,
    )
    .await
    .expect("Failed to create account")
}

pub async fn create_admin(ctx: &TestHarness) -> Account {
    create_account(ctx, Role::Admin).await
}

/// Faculty account plus profile
pub async fn create_faculty(ctx: &TestHarness) -> (Account, Faculty) {
    let account = create_account(ctx, Role::Faculty).await;
    let faculty = Faculty::create(
        &NewFaculty {
            account_id: account.id,
            employee_id: unique("EMP"),
            name: "Dr. Test Faculty".to_string(),
            department: "Computer".to_string(),
            designation: "Assistant Professor".to_string(),
            phone: "9000000000".to_string(),
            specialization: Some("Databases".to_string()),
        },
        &ctx.db_pool,
    )
    .await
    .expect("Failed to create faculty");
    (account, faculty)
}

/// Student account plus record, roll number drawn from the real sequence
pub async fn create_student(ctx: &TestHarness) -> (Account, Student) {
    let account = create_account(ctx, Role::Student).await;
    let roll_number = ctx
        .deps
        .roll_numbers
        .next(Utc::now().year(), &ctx.db_pool)
        .await
        .expect("Failed to draw roll number");

    let student = Student::create(
        &NewStudent {
            account_id: account.id,
            roll_number,
            name: "Test Student".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2006, 1, 15).expect("valid date"),
            phone: "9111111111".to_string(),
            address: "Aligarh".to_string(),
            department: "Computer".to_string(),
            program: "Computer Science B.Tech".to_string(),
            semester: 1,
        },
        &ctx.db_pool,
    )
    .await
    .expect("Failed to create student");
    (account, student)
}

pub async fn create_course(ctx: &TestHarness, max_students: i32) -> Course {
    Course::create(
        &NewCourse {
            course_code: unique("CS"),
            course_name: "Database Systems".to_string(),
            department: "Computer".to_string(),
            credits: 4,
            semester: 1,
            faculty_id: None,
            description: None,
            max_students: Some(max_students),
        },
        &ctx.db_pool,
    )
    .await
    .expect("Failed to create course")
}

pub async fn create_exam(
    ctx: &TestHarness,
    course_id: CourseId,
    total_marks: f64,
    created_by: AccountId,
) -> Exam {
    Exam::create(
        &NewExam {
            course_id,
            exam_type: ExamType::Midterm,
            exam_name: "Midterm".to_string(),
            exam_date: Utc::now() + Duration::days(7),
            duration: 120,
            total_marks,
            venue: Some("Hall A".to_string()),
            instructions: None,
        },
        created_by,
        &ctx.db_pool,
    )
    .await
    .expect("Failed to create exam")
}

pub async fn create_fee(
    ctx: &TestHarness,
    student_id: StudentId,
    amount: Decimal,
    due_date: NaiveDate,
) -> Fee {
    Fee::create(
        &NewFee {
            student_id,
            fee_type: FeeType::Tuition,
            amount,
            due_date,
            semester: 1,
            academic_year: "2026-27".to_string(),
        },
        &ctx.db_pool,
    )
    .await
    .expect("Failed to create fee")
}

/// Admission form body for `POST /api/admissions`
pub fn application_body(email: &str, program: &str, score: f64) -> Value {
    json!({
        "applicant_name": "Test Applicant",
        "email": email,
        "phone": "9222222222",
        "date_of_birth": "2007-04-02",
        "address": "Civil Lines, Aligarh",
        "program": program,
        "previous_education": {
            "institution": "City Senior Secondary",
            "percentage": 88.0,
            "year": 2025
        },
        "entrance_score": score
    })
}
