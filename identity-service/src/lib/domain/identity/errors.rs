use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Display name must not be blank")]
    Empty,

    #[error("Display name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for authentication operations.
///
/// Expected outcomes (bad credentials, duplicate email) are ordinary
/// variants here, never panics; infrastructure faults travel through
/// `Database` and `Unknown` and surface as 500-class responses at the edge.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Identical message for unknown email and wrong password, so a caller
    // cannot learn which part was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already in use: {0}")]
    EmailAlreadyExists(String),

    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid display name: {0}")]
    InvalidDisplayName(#[from] DisplayNameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] auth::RoleError),

    #[error("Invalid role set: {0}")]
    InvalidRoleSet(#[from] auth::RoleSetError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}
