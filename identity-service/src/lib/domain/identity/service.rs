use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::RoleSet;
use auth::TokenService;
use chrono::Utc;

use crate::identity::errors::AuthError;
use crate::identity::models::Authenticated;
use crate::identity::models::Credentials;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::IdentitySummary;
use crate::identity::models::RegisterCommand;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::IdentityRepository;

/// Authentication engine.
///
/// Orchestrates credential verification and registration against the
/// identity store and mints access tokens for verified identities. Stateless
/// between calls; the store is the only shared resource.
pub struct AuthService<R>
where
    R: IdentityRepository,
{
    repository: Arc<R>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<R> AuthService<R>
where
    R: IdentityRepository,
{
    /// Create a new authentication engine with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `token_service` - Token issuer holding the signing key
    pub fn new(repository: Arc<R>, token_service: Arc<TokenService>) -> Self {
        Self {
            repository,
            token_service,
            password_hasher: PasswordHasher::new(),
        }
    }

    fn issue_for(&self, identity: &Identity) -> Result<Authenticated, AuthError> {
        let token = self.token_service.issue(
            &identity.id.to_string(),
            identity.email.as_str(),
            identity.display_name.as_str(),
            &identity.roles,
        )?;

        Ok(Authenticated {
            token,
            identity: IdentitySummary::from(identity),
        })
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: IdentityRepository,
{
    async fn login(&self, credentials: Credentials) -> Result<Authenticated, AuthError> {
        let identity = match self.repository.find_by_email(&credentials.email).await? {
            Some(identity) => identity,
            // Same failure as a wrong password
            None => return Err(AuthError::InvalidCredentials),
        };

        let password_matches = self
            .password_hasher
            .verify(&credentials.password, &identity.password_hash)?;

        if !password_matches {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(identity_id = %identity.id, "Login verified");

        self.issue_for(&identity)
    }

    async fn register(&self, command: RegisterCommand) -> Result<Authenticated, AuthError> {
        if self.repository.exists_by_email(&command.email).await? {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let identity = Identity {
            id: IdentityId::new(),
            email: command.email,
            display_name: command.display_name,
            password_hash,
            roles: command
                .role
                .map(RoleSet::single)
                .unwrap_or_else(RoleSet::baseline),
            created_at: Utc::now(),
        };

        // The store re-enforces uniqueness atomically; a concurrent
        // registration for the same email loses here
        let identity = self.repository.save(identity).await?;

        tracing::info!(identity_id = %identity.id, "Identity registered");

        self.issue_for(&identity)
    }
}
