//! Auth domain - accounts, password login and JWT issuance
//!
//! Every account carries one role. Students and faculty also own a profile
//! row in the academic records store, resolved by role on the way out.

pub mod actions;
pub mod jwt;
pub mod models;
pub mod types;

pub use jwt::{Claims, JwtService};
pub use models::Account;
pub use types::Profile;
