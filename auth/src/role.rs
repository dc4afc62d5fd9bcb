use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Permission tag attached to an identity.
///
/// Serialized in wire form as `"USER"`, `"AGENT"`, `"ADMIN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Agent,
    Admin,
}

impl Role {
    /// All roles an identity can be assigned.
    pub const ALL: [Role; 3] = [Role::User, Role::Agent, Role::Admin];

    /// Get the wire-form name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Agent => "AGENT",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "AGENT" => Ok(Role::Agent),
            "ADMIN" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for role parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Non-empty set of roles.
///
/// Every identity carries at least one role; the constructor rejects empty
/// input so the invariant holds wherever a RoleSet exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeSet<Role>", into = "BTreeSet<Role>")]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Create a role set from any iterator of roles.
    ///
    /// # Errors
    /// * `Empty` - The iterator yielded no roles
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, RoleSetError> {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Err(RoleSetError::Empty);
        }
        Ok(Self(roles))
    }

    /// Role set containing exactly one role.
    pub fn single(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }

    /// The baseline role set assigned when none is requested.
    pub fn baseline() -> Self {
        Self::single(Role::User)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeSet<Role>> for RoleSet {
    type Error = RoleSetError;

    fn try_from(roles: BTreeSet<Role>) -> Result<Self, Self::Error> {
        Self::new(roles)
    }
}

impl From<RoleSet> for BTreeSet<Role> {
    fn from(roles: RoleSet) -> Self {
        roles.0
    }
}

/// Error type for role set construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleSetError {
    #[error("An identity must carry at least one role")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_via_str() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn test_unknown_role() {
        let result = Role::from_str("SUPERUSER");
        assert_eq!(result, Err(RoleError::Unknown("SUPERUSER".to_string())));
    }

    #[test]
    fn test_role_wire_form() {
        let json = serde_json::to_string(&Role::Agent).unwrap();
        assert_eq!(json, r#""AGENT""#);

        let role: Role = serde_json::from_str(r#""ADMIN""#).unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_role_set_rejects_empty() {
        assert_eq!(RoleSet::new([]), Err(RoleSetError::Empty));
    }

    #[test]
    fn test_role_set_deduplicates() {
        let roles = RoleSet::new([Role::User, Role::User, Role::Admin]).unwrap();
        assert_eq!(roles.len(), 2);
        assert!(roles.contains(Role::User));
        assert!(roles.contains(Role::Admin));
    }

    #[test]
    fn test_baseline_is_user() {
        let roles = RoleSet::baseline();
        assert_eq!(roles.len(), 1);
        assert!(roles.contains(Role::User));
    }

    #[test]
    fn test_role_set_deserialization_rejects_empty() {
        let result: Result<RoleSet, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
