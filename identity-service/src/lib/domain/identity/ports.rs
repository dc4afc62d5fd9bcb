use async_trait::async_trait;

use crate::identity::errors::AuthError;
use crate::identity::models::Authenticated;
use crate::identity::models::Credentials;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::RegisterCommand;

/// Port for the authentication engine.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Returns
    /// Token plus identity summary on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, without
    ///   distinguishing the two
    /// * `Database` - Storage operation failed
    async fn login(&self, credentials: Credentials) -> Result<Authenticated, AuthError>;

    /// Register a new identity and issue its first access token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another identity holds this email
    /// * `Database` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Authenticated, AuthError>;
}

/// Persistence operations for the identity aggregate.
///
/// Absence is data, not an error: lookups return `Ok(None)` / `Ok(false)`
/// so callers can branch cleanly.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Retrieve an identity by normalized email address.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError>;

    /// Check whether any identity holds the given normalized email.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError>;

    /// Persist a new identity.
    ///
    /// Insertion and the uniqueness guarantee are atomic: two concurrent
    /// saves for the same email commit at most one row.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another identity holds this email
    /// * `Database` - Storage operation failed
    async fn save(&self, identity: Identity) -> Result<Identity, AuthError>;
}
