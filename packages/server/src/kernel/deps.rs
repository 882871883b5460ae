//! Server dependencies shared by every workflow.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::RollNumberSequence;

/// Dependency container handed to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    /// Unique roll numbers for newly admitted students
    pub roll_numbers: RollNumberSequence,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        jwt_service: Arc<JwtService>,
        roll_numbers: RollNumberSequence,
    ) -> Self {
        Self {
            db_pool,
            jwt_service,
            roll_numbers,
        }
    }
}
