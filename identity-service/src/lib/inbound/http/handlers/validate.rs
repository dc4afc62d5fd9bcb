use auth::RoleSet;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

/// Confirm the presented token and echo the identity it asserts.
///
/// The middleware has already validated the token; the claims arrive here
/// through the request extensions, never through ambient state.
pub async fn validate(
    Extension(authenticated): Extension<AuthenticatedIdentity>,
) -> ApiSuccess<ValidateResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ValidateResponseData {
            id: authenticated.id.to_string(),
            email: authenticated.claims.email,
            display_name: authenticated.claims.name,
            roles: authenticated.claims.roles,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub roles: RoleSet,
}
