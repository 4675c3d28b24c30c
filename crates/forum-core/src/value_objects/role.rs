//! User roles with a strict ordering: user < moderator < admin
//!
//! Every authorization decision in the moderation workflow derives from the
//! ordering on this enum and the single `can_moderate` predicate, instead of
//! ad-hoc string comparisons scattered across operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Forum role, ordered by privilege
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Check if this role has any moderation privileges
    #[inline]
    pub fn is_staff(self) -> bool {
        self >= Role::Moderator
    }

    /// Check if this role is admin
    #[inline]
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// Escalation rule: an actor may moderate a target of strictly lower rank.
    ///
    /// Consequences:
    /// - a moderator may act on a user, but not on another moderator
    /// - an admin may act on a moderator or a user
    /// - nobody may act on an admin
    #[inline]
    pub fn can_moderate(self, target: Role) -> bool {
        self.is_staff() && self > target
    }

    /// Database/string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a Role from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}
