use super::{AuthError, Capability, Resource};
use crate::common::entity_ids::UserId;

/// Entry point for authorization checks
///
/// Usage:
/// ```
/// use playday_core::common::auth::{Actor, Capability, Resource};
/// use playday_core::common::UserId;
///
/// let actor = Actor::new(UserId::new(), false);
/// assert!(actor.can(Capability::View).on(Resource::EBazaar).check().is_ok());
/// assert!(actor.can(Capability::Delete).on(Resource::EBazaar).check().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    user_id: UserId,
    is_admin: bool,
    permissions: Vec<String>,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `user_id` - The user performing the action
    /// * `is_admin` - Admin flag from the verified JWT
    pub fn new(user_id: UserId, is_admin: bool) -> Self {
        Self {
            user_id,
            is_admin,
            permissions: Vec::new(),
        }
    }

    /// Attach explicit permission grants, e.g. `"ebazaar.create"` or `"ebazaar.*"`.
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Specify what capability the actor needs
    pub fn can(&self, capability: Capability) -> CapabilityBuilder<'_> {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder<'a> {
    actor: &'a Actor,
    capability: Capability,
}

impl<'a> CapabilityBuilder<'a> {
    /// Name the resource family the capability applies to
    pub fn on(self, resource: Resource) -> ResourceCheck<'a> {
        ResourceCheck {
            actor: self.actor,
            capability: self.capability,
            resource,
        }
    }
}

/// Fully specified check, ready to run
pub struct ResourceCheck<'a> {
    actor: &'a Actor,
    capability: Capability,
    resource: Resource,
}

impl ResourceCheck<'_> {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        match authorize(self.actor, self.capability, self.resource) {
            Decision::Allow => Ok(()),
            Decision::Deny => {
                tracing::debug!(
                    user_id = %self.actor.user_id,
                    capability = %self.capability,
                    resource = %self.resource,
                    "Authorization denied"
                );
                Err(AuthError::PermissionDenied {
                    capability: self.capability,
                    resource: self.resource,
                })
            }
        }
    }
}

/// Outcome of a policy decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Core policy function: may `actor` exercise `capability` on `resource`?
///
/// Admins hold every capability. Everyone else holds the resource's default
/// grants plus whatever their token lists as `"<resource>.<capability>"` or
/// `"<resource>.*"`.
pub fn authorize(actor: &Actor, capability: Capability, resource: Resource) -> Decision {
    if actor.is_admin {
        return Decision::Allow;
    }

    if resource.default_grants().contains(&capability) {
        return Decision::Allow;
    }

    let exact = format!("{}.{}", resource.as_str(), capability.as_str());
    let wildcard = format!("{}.*", resource.as_str());
    let granted = actor
        .permissions
        .iter()
        .any(|permission| *permission == exact || *permission == wildcard);

    if granted {
        Decision::Allow
    } else {
        Decision::Deny
    }
}
