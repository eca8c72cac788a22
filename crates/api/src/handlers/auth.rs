//! Handlers for the `/auth` resource (register, login, password reset).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campus_core::application::ApplicationStatus;
use campus_core::error::CoreError;
use campus_core::roles::{self, Role};
use campus_db::models::user::{CreateUser, User, UserResponse};
use campus_db::repositories::UserRepo;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{
    generate_access_token, generate_reset_token, hash_reset_token, RESET_TOKEN_VALIDITY_MINS,
};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Minimum password length enforced on registration and resets.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Requested role: `"student"` (default) or `"teacher"`. Teacher
    /// registrations open an application and park the account as a
    /// pending teacher with student rights.
    pub role: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Register a student or a teacher applicant. Returns 201 with an access
/// token; the token carries the effective role, so a teacher applicant
/// starts out with student capabilities.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    // 1. Field validation.
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Email address is not valid".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Resolve the requested role; teacher registrations open an
    //    application instead of granting the role directly.
    let requested = match &input.role {
        Some(role) => Role::parse(role)?,
        None => Role::Student,
    };
    roles::validate_registration_role(requested)?;

    let (stored_role, application_status) = match requested {
        Role::Teacher => (
            Role::PendingTeacher,
            Some(ApplicationStatus::Pending.as_str().to_string()),
        ),
        _ => (Role::Student, None),
    };

    // 3. Hash the password.
    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 4. Create the user. A duplicate email surfaces as 409 via the
    //    uq_users_email constraint.
    let create_dto = CreateUser {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        password_hash: hashed,
        role: stored_role.as_str().to_string(),
        application_status,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    // 5. Issue a token with the effective role.
    let response = build_auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. The issued token carries the
/// effective role current at login time; role changes (e.g. an approved
/// teacher application) require logging in again.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, &input.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Banned accounts are refused outright.
    if user.is_banned {
        let reason = user.ban_reason.as_deref().unwrap_or("no reason recorded");
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Account is banned: {reason}"
        ))));
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let response = build_auth_response(&state, &user)?;
    Ok(Json(response))
}

/// POST /api/v1/auth/forgot-password
///
/// Always answers 200 with a generic message so the endpoint cannot be
/// used to enumerate accounts. When the account exists, a single-use
/// token (1 hour validity) is generated, stored hashed, and emailed.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email.trim().to_lowercase())
        .await?
    {
        let (token, token_hash) = generate_reset_token();
        let expires_at = Utc::now() + chrono::Duration::minutes(RESET_TOKEN_VALIDITY_MINS);
        UserRepo::set_reset_token(&state.pool, user.id, &token_hash, expires_at).await?;

        match &state.mailer {
            Some(mailer) => {
                if let Err(e) = mailer.send_password_reset(&user.email, &token).await {
                    // The token is stored either way; the user can retry.
                    tracing::error!(user_id = user.id, error = %e, "Failed to send reset email");
                }
            }
            None => {
                tracing::warn!(user_id = user.id, "Reset token generated but SMTP is not configured");
            }
        }
    }

    Ok(Json(serde_json::json!({
        "message": "If that account exists, a password reset email has been sent"
    })))
}

/// POST /api/v1/auth/reset-password
///
/// Redeem a reset token. Tokens are single-use: setting the new password
/// clears the stored hash.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let token_hash = hash_reset_token(&input.token);
    let user = UserRepo::find_by_reset_token(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("Invalid or expired reset token".into()))
        })?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hashed).await?;

    tracing::info!(user_id = user.id, "Password reset via token");
    Ok(Json(serde_json::json!({ "message": "Password has been reset" })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue an access token for the user's effective role and assemble the
/// auth response.
fn build_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let role = Role::parse(&user.role)?;
    let access_token = generate_access_token(user.id, role.effective().as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
