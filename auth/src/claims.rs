use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::RoleSet;

/// Decoded payload of an access token.
///
/// Carries the identity the token asserts plus the RFC 7519 time claims.
/// The password hash never appears here; a token is safe to hand to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the identity id the token was issued for
    pub sub: String,

    /// Normalized email of the identity
    pub email: String,

    /// Display name of the identity
    pub name: String,

    /// Roles held by the identity at issuance
    pub roles: RoleSet,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity with automatic expiration.
    ///
    /// # Arguments
    /// * `subject` - Identity id the token asserts
    /// * `email` - Normalized email address
    /// * `name` - Display name
    /// * `roles` - Roles held at issuance
    /// * `validity_hours` - Hours until the token expires
    pub fn for_identity(
        subject: impl ToString,
        email: impl ToString,
        name: impl ToString,
        roles: RoleSet,
        validity_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(validity_hours);

        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn test_for_identity_sets_validity_window() {
        let claims = Claims::for_identity(
            "b2c6e6f0-0000-0000-0000-000000000001",
            "alice@example.com",
            "Alice",
            RoleSet::baseline(),
            24,
        );

        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let mut claims =
            Claims::for_identity("id", "a@example.com", "A", RoleSet::baseline(), 1);
        claims.iat = 1000;
        claims.exp = 2000;

        assert!(!claims.is_expired(1999));
        assert!(!claims.is_expired(2000));
        assert!(claims.is_expired(2001));
    }

    #[test]
    fn test_roles_wire_form() {
        let claims = Claims::for_identity(
            "id",
            "a@example.com",
            "A",
            RoleSet::new([Role::Admin, Role::User]).unwrap(),
            1,
        );

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["roles"], serde_json::json!(["USER", "ADMIN"]));
    }
}
