//! Authentication primitives library
//!
//! Provides the credential and token building blocks for the ticketing
//! services:
//! - Password hashing (Argon2id)
//! - Signed access token issuance and validation (HS256 JWT)
//! - Role and claim types shared across service boundaries
//!
//! The service crates own the orchestration (who may log in, how identities
//! are stored); this crate only knows how to hash, sign, and verify.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{RoleSet, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", 24);
//! let token = tokens
//!     .issue("user123", "alice@example.com", "Alice", &RoleSet::baseline())
//!     .unwrap();
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod claims;
pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use claims::Claims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleError;
pub use role::RoleSet;
pub use role::RoleSetError;
pub use token::TokenError;
pub use token::TokenService;
