// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod types;
pub mod utils;

pub use auth::{Actor, AuthError, Capability};
pub use entity_ids::*;
pub use error::{ApiError, ApiResult};
pub use id::Id;
pub use types::*;
