use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::identity::models::Credentials;
use crate::identity::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    // A syntactically invalid email cannot belong to any identity; report
    // the same failure as any other bad credential
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let authenticated = state
        .auth_service
        .login(Credentials::new(email, body.password))
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData::from(authenticated),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
