use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use thiserror::Error;

use crate::claims::Claims;
use crate::role::RoleSet;

/// Issues and validates signed access tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing key is fixed at construction
/// and never exposed; a token signed with one key is never valid under
/// another.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity_hours: i64,
}

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Signing key, at least 256 bits (32 bytes) for HS256.
    ///   Load it from configuration or a vault, never hard-code it.
    /// * `validity_hours` - Hours a freshly issued token stays valid
    pub fn new(secret: &[u8], validity_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity_hours,
        }
    }

    /// Issue a signed token asserting the given identity.
    ///
    /// Sets `iat` to now and `exp` to now plus the configured validity
    /// window.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claim serialization or signing failed
    pub fn issue(
        &self,
        subject: &str,
        email: &str,
        name: &str,
        roles: &RoleSet,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_identity(subject, email, name, roles.clone(), self.validity_hours);
        self.encode(&claims)
    }

    /// Sign an explicit claim set.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a presented token and decode its claims.
    ///
    /// Verifies the signature and that the token has not passed its
    /// expiration time.
    ///
    /// # Errors
    /// * `Expired` - `exp` lies in the past
    /// * `InvalidSignature` - Signature check against the key failed
    /// * `Malformed` - The token cannot be parsed
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // No leeway: a token is rejected the second it expires
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new(SECRET, 24);

        let roles = RoleSet::new([Role::User, Role::Agent]).unwrap();
        let token = service
            .issue("user123", "alice@example.com", "Alice", &roles)
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = service.validate(&token).expect("Failed to validate token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.roles, roles);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let issuer = TokenService::new(b"secret1_at_least_32_bytes_long_key!", 24);
        let verifier = TokenService::new(b"secret2_at_least_32_bytes_long_key!", 24);

        let token = issuer
            .issue("user123", "a@example.com", "A", &RoleSet::baseline())
            .expect("Failed to issue token");

        let result = verifier.validate(&token);
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_validate_expired_token() {
        let service = TokenService::new(SECRET, 24);

        let mut claims = Claims::for_identity(
            "user123",
            "a@example.com",
            "A",
            RoleSet::baseline(),
            1,
        );
        claims.iat -= 7200;
        claims.exp -= 7200;

        let token = service.encode(&claims).expect("Failed to encode token");
        let result = service.validate(&token);
        assert_eq!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_validate_garbage() {
        let service = TokenService::new(SECRET, 24);

        let result = service.validate("not.a.token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_validate_corrupted_token_never_succeeds() {
        let service = TokenService::new(SECRET, 24);

        let token = service
            .issue("user123", "a@example.com", "A", &RoleSet::baseline())
            .expect("Failed to issue token");

        // Flip one character at every position; no variant may validate
        for i in 0..token.len() {
            let mut corrupted: Vec<u8> = token.bytes().collect();
            corrupted[i] = if corrupted[i] == b'A' { b'B' } else { b'A' };
            let corrupted = String::from_utf8(corrupted).unwrap();
            if corrupted == token {
                continue;
            }

            let result = service.validate(&corrupted);
            assert!(
                matches!(
                    result,
                    Err(TokenError::Malformed(_)) | Err(TokenError::InvalidSignature)
                ),
                "corrupted token at byte {} validated: {:?}",
                i,
                result
            );
        }
    }
}
