use std::str::FromStr;

use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::identity::models::DisplayName;
use crate::identity::models::EmailAddress;
use crate::identity::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let display_name = DisplayName::new(body.display_name)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    if body.password.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "Password must not be empty".to_string(),
        ));
    }

    let role = body
        .role
        .as_deref()
        .map(Role::from_str)
        .transpose()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let authenticated = state
        .auth_service
        .register(RegisterCommand::new(
            email,
            display_name,
            body.password,
            role,
        ))
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthResponseData::from(authenticated),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
    display_name: String,
    role: Option<String>,
}
