use std::fmt;
use std::str::FromStr;

use auth::Role;
use auth::RoleSet;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::DisplayNameError;
use crate::identity::errors::EmailError;
use crate::identity::errors::IdentityIdError;

/// Identity aggregate entity.
///
/// Represents one registered principal. The password hash stays inside the
/// store boundary: it is never carried by [`IdentitySummary`] or any token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password_hash: String,
    pub roles: RoleSet,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, the sole authentication handle.
///
/// Validated against RFC 5322 and normalized to lowercase on construction,
/// so equality, uniqueness, and lookup are case-insensitive everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get the normalized email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type.
///
/// Free text shown to humans; plays no part in security decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 128;

    /// Create a new display name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank after trimming
    /// * `TooLong` - Name exceeds 128 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        if name.len() > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: name.len(),
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Transient email + password pair submitted for login.
///
/// Lives only for the duration of a single authentication attempt and is
/// never persisted.
#[derive(Debug)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl Credentials {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to register a new identity with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password: String,
    pub role: Option<Role>,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated, normalized email address
    /// * `display_name` - Validated display name
    /// * `password` - Plain text password (hashed by the engine)
    /// * `role` - Requested role; the baseline role is assigned when absent
    pub fn new(
        email: EmailAddress,
        display_name: DisplayName,
        password: String,
        role: Option<Role>,
    ) -> Self {
        Self {
            email,
            display_name,
            password,
            role,
        }
    }
}

/// Outward-facing view of an identity, minus the password hash.
#[derive(Debug, Clone)]
pub struct IdentitySummary {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub roles: RoleSet,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            roles: identity.roles.clone(),
        }
    }
}

/// Successful authentication outcome: a signed token plus the identity it
/// asserts.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub token: String,
    pub identity: IdentitySummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Alice@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_emails_differing_only_in_case_are_equal() {
        let lower = EmailAddress::new("a@x.com".to_string()).unwrap();
        let upper = EmailAddress::new("A@X.COM".to_string()).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_display_name_rejects_blank() {
        assert_eq!(
            DisplayName::new("   ".to_string()),
            Err(DisplayNameError::Empty)
        );
    }

    #[test]
    fn test_display_name_trims() {
        let name = DisplayName::new("  Alice  ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_identity_id_round_trip() {
        let id = IdentityId::new();
        let parsed = IdentityId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_identity_id_rejects_garbage() {
        assert!(IdentityId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_summary_carries_no_hash() {
        let identity = Identity {
            id: IdentityId::new(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            display_name: DisplayName::new("A".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            roles: RoleSet::baseline(),
            created_at: Utc::now(),
        };

        let summary = IdentitySummary::from(&identity);
        assert_eq!(summary.id, identity.id);
        assert_eq!(summary.email, identity.email);
        assert_eq!(summary.roles, identity.roles);
    }
}
