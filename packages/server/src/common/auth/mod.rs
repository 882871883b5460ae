//! Role-based authorization
//!
//! Handlers resolve the caller into an [`Actor`] and ask for a
//! [`Capability`]:
//!
//! ```ignore
//! use crate::common::auth::{Actor, Capability};
//!
//! let actor = Actor::new(account_id, role)
//!     .can(Capability::EnterResults)
//!     .check()?;
//! ```

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityCheck};
pub use capability::Capability;
pub use errors::AuthError;
