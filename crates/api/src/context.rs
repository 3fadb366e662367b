use brocante_core::{Identity, Role, UserId};

/// Identity context for a request.
///
/// This is immutable and must be present for all domain routes; the identity
/// middleware inserts it after resolving the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    identity: Identity,
}

impl IdentityContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id()
    }

    pub fn role(&self) -> Role {
        self.identity.role()
    }
}
