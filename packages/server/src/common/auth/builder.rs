use super::{AuthError, Capability};
use crate::common::{AccountId, Role};

/// Entry point for authorization checks
///
/// ```ignore
/// Actor::new(account_id, role)
///     .can(Capability::ReviewAdmissions)
///     .check()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    account_id: AccountId,
    role: Role,
}

impl Actor {
    /// `role` comes from a verified token; it is trusted as-is.
    pub fn new(account_id: AccountId, role: Role) -> Self {
        Self { account_id, role }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityCheck {
        CapabilityCheck {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityCheck {
    actor: Actor,
    capability: Capability,
}

impl CapabilityCheck {
    /// Perform the authorization check, handing back the actor on success
    pub fn check(self) -> Result<Actor, AuthError> {
        if self.capability.allows(self.actor.role) {
            Ok(self.actor)
        } else {
            tracing::debug!(
                account_id = %self.actor.account_id,
                role = %self.actor.role,
                capability = ?self.capability,
                "Capability check denied"
            );
            Err(AuthError::PermissionDenied {
                role: self.actor.role,
                action: self.capability.action(),
            })
        }
    }
}
