//! Request identity: who is calling, threaded explicitly into every operation.
//!
//! Session/auth token handling is an upstream concern. Core operations never
//! read ambient "current user" state; they receive the resolved identity as a
//! parameter.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::UserId;

/// Coarse role attached to an authenticated identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!(
                "role must be one of: buyer, seller, admin (got '{other}')"
            ))),
        }
    }
}

/// Authenticated caller identity for a single request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Seller".parse::<Role>().unwrap(), Role::Seller);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn admin_flag_tracks_role() {
        let user = UserId::new();
        assert!(Identity::new(user, Role::Admin).is_admin());
        assert!(!Identity::new(user, Role::Seller).is_admin());
    }
}
