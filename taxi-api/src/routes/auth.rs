/// Authentication endpoints
///
/// - `POST /v1/auth/register`: create a driver account and sign in
/// - `POST /v1/auth/login`: exchange username and password for tokens
/// - `POST /v1/auth/refresh`: exchange a refresh token for a new access token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::JsonBody,
    routes::drivers::CreateDriverRequest,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taxi_shared::{
    auth::{jwt, password},
    models::driver::Driver,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
}

/// Tokens issued on register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub driver_id: Uuid,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Registers a new driver
///
/// ```text
/// POST /v1/auth/register
///
/// {
///   "username": "jdoe",
///   "password": "Taxi!2024",
///   "first_name": "John",
///   "last_name": "Doe",
///   "license_number": "ABC12345"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: invalid field, or username or license
///   number already taken
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateDriverRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    let driver = Driver::create(&state.db, req.into_create_driver()?).await?;
    let tokens = jwt::issue_token_pair(driver.id, state.jwt_secret())?;

    info!(driver_id = %driver.id, username = %driver.username, "Driver registered");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            driver_id: driver.id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

/// Logs a driver in
///
/// Unknown usernames, wrong passwords and inactive accounts all answer with
/// the same 401.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

    let driver = Driver::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &driver.password_hash)? || !driver.is_active {
        return Err(invalid());
    }

    Driver::update_last_login(&state.db, driver.id).await?;
    let tokens = jwt::issue_token_pair(driver.id, state.jwt_secret())?;

    info!(driver_id = %driver.id, "Driver logged in");

    Ok(Json(TokenResponse {
        driver_id: driver.id,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// Exchanges a refresh token for a new access token
///
/// # Errors
///
/// - `401 Unauthorized`: invalid or expired refresh token, or an access token
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}
