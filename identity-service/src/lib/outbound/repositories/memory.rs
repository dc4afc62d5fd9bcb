use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::identity::errors::AuthError;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::ports::IdentityRepository;

/// Identity store held in process memory, keyed by normalized email.
///
/// The existence check and the insert happen under one lock acquisition, so
/// concurrent registrations for the same email commit exactly one identity.
/// Backs the hermetic test suite and local development; durable deployments
/// use [`super::PostgresIdentityRepository`].
pub struct InMemoryIdentityRepository {
    identities: Mutex<HashMap<String, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.identities
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryIdentityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError> {
        let identities = self.identities.lock().unwrap_or_else(|e| e.into_inner());
        Ok(identities.get(email.as_str()).cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        let identities = self.identities.lock().unwrap_or_else(|e| e.into_inner());
        Ok(identities.contains_key(email.as_str()))
    }

    async fn save(&self, identity: Identity) -> Result<Identity, AuthError> {
        let mut identities = self.identities.lock().unwrap_or_else(|e| e.into_inner());

        if identities.contains_key(identity.email.as_str()) {
            return Err(AuthError::EmailAlreadyExists(
                identity.email.as_str().to_string(),
            ));
        }

        identities.insert(identity.email.as_str().to_string(), identity.clone());
        Ok(identity)
    }
}
