use auth::Role;
use axum::http::StatusCode;

use super::ApiSuccess;

/// List the role names an identity can be registered with.
pub async fn list_roles() -> ApiSuccess<Vec<String>> {
    let roles = Role::ALL
        .iter()
        .map(|role| role.as_str().to_string())
        .collect();

    ApiSuccess::new(StatusCode::OK, roles)
}
