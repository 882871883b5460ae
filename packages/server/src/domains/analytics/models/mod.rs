pub mod dashboard;

pub use dashboard::{
    Dashboard, DepartmentCount, FeeStat, HostelOccupancy, Overview, RecentAdmission,
};
