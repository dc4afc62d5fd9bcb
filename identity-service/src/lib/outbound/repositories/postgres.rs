use async_trait::async_trait;
use auth::Role;
use auth::RoleSet;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::identity::errors::AuthError;
use crate::identity::models::DisplayName;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::ports::IdentityRepository;

/// Identity store backed by PostgreSQL.
///
/// The `identities` table carries a unique index on the normalized email
/// column, so uniqueness holds even when two registrations race; the losing
/// insert surfaces as `EmailAlreadyExists`.
pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn identity_from_row(row: &PgRow) -> Result<Identity, AuthError> {
        let email: String = row
            .try_get("email")
            .map_err(|e| AuthError::Database(e.to_string()))?;
        let display_name: String = row
            .try_get("display_name")
            .map_err(|e| AuthError::Database(e.to_string()))?;
        let role_names: Vec<String> = row
            .try_get("roles")
            .map_err(|e| AuthError::Database(e.to_string()))?;

        let roles = role_names
            .iter()
            .map(|name| name.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Identity {
            id: IdentityId(
                row.try_get("id")
                    .map_err(|e| AuthError::Database(e.to_string()))?,
            ),
            email: EmailAddress::new(email)?,
            display_name: DisplayName::new(display_name)?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| AuthError::Database(e.to_string()))?,
            roles: RoleSet::new(roles)?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| AuthError::Database(e.to_string()))?,
        })
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, display_name, password_hash, roles, created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(Self::identity_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(SELECT 1 FROM identities WHERE email = $1) AS present
            "#,
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        row.try_get("present")
            .map_err(|e| AuthError::Database(e.to_string()))
    }

    async fn save(&self, identity: Identity) -> Result<Identity, AuthError> {
        let roles: Vec<String> = identity
            .roles
            .iter()
            .map(|role| role.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO identities (id, email, display_name, password_hash, roles, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.email.as_str())
        .bind(identity.display_name.as_str())
        .bind(&identity.password_hash)
        .bind(&roles)
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("identities_email_key")
                {
                    return AuthError::EmailAlreadyExists(identity.email.as_str().to_string());
                }
            }
            AuthError::Database(e.to_string())
        })?;

        Ok(identity)
    }
}
