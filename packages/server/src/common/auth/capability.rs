use crate::common::Role;

/// Role-gated operations
///
/// Each capability names the roles allowed to perform it. Operations open to
/// any authenticated caller do not have a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// List applications and approve or reject them
    ReviewAdmissions,

    /// Create and soft-delete courses
    ManageCourses,

    /// Edit course details
    EditCourses,

    /// Mark a student present, absent or late
    MarkAttendance,

    /// Create and update exams
    ManageExams,

    /// Remove an exam and its results
    DeleteExams,

    /// Enter or correct exam results
    EnterResults,

    /// Raise and adjust fee items
    ManageFees,

    /// Allocate rooms and update allocations
    ManageHostels,

    /// Request a hostel room for oneself
    ApplyForHostel,

    /// Graduate students into alumni records
    ManageAlumni,

    /// Read the institution-wide dashboard
    ViewDashboard,

    /// Create admin and faculty accounts
    RegisterStaff,
}

impl Capability {
    /// Roles allowed to exercise this capability
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Capability::ReviewAdmissions
            | Capability::ManageCourses
            | Capability::DeleteExams
            | Capability::ManageFees
            | Capability::ManageHostels
            | Capability::ManageAlumni
            | Capability::ViewDashboard
            | Capability::RegisterStaff => &[Role::Admin],
            Capability::EditCourses | Capability::ManageExams | Capability::EnterResults => {
                &[Role::Admin, Role::Faculty]
            }
            Capability::MarkAttendance => &[Role::Faculty],
            Capability::ApplyForHostel => &[Role::Student],
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// Short verb phrase used in denial messages
    pub fn action(&self) -> &'static str {
        match self {
            Capability::ReviewAdmissions => "review admissions",
            Capability::ManageCourses => "manage courses",
            Capability::EditCourses => "edit courses",
            Capability::MarkAttendance => "mark attendance",
            Capability::ManageExams => "manage exams",
            Capability::DeleteExams => "delete exams",
            Capability::EnterResults => "enter results",
            Capability::ManageFees => "manage fees",
            Capability::ManageHostels => "manage hostels",
            Capability::ApplyForHostel => "apply for a hostel",
            Capability::ManageAlumni => "manage alumni",
            Capability::ViewDashboard => "view the dashboard",
            Capability::RegisterStaff => "register staff accounts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_register_staff() {
        assert!(Capability::RegisterStaff.allows(Role::Admin));
        assert!(!Capability::RegisterStaff.allows(Role::Faculty));
        assert!(!Capability::RegisterStaff.allows(Role::Student));
    }
}
