//! Handlers for the `/users` resource (own profile).
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::uploads::image_extension;
use campus_db::models::user::{UpdateProfile, UserResponse};
use campus_db::repositories::UserRepo;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::uploads::{read_file_field, remove_stored_file, store_file, validate_image};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Minimum password length enforced on password change.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /users/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/users/profile
///
/// Update own name/email. A duplicate email surfaces as 409 via the
/// uq_users_email constraint.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    if let Some(email) = &input.email {
        if !email.contains('@') {
            return Err(AppError::Core(CoreError::Validation(
                "Email address is not valid".into(),
            )));
        }
        input.email = Some(email.trim().to_lowercase());
    }
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Name must not be empty".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/users/change-password
///
/// Verifies the current password before applying the new one. Returns 204.
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, auth.user_id, &hashed).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/profile/image
///
/// Multipart upload with a required `image` field. Replaces any previous
/// avatar (the old file is removed best-effort).
pub async fn upload_avatar(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let file = read_file_field(&mut multipart, "image").await?;
    validate_image(&file)?;

    let ext = image_extension(&file.content_type);
    let filename = format!("user_{}_{}.{ext}", auth.user_id, Uuid::new_v4());
    let public_path = store_file(&state.config.upload_dir, "avatars", &filename, &file.data).await?;

    // Remove the previous avatar, if any, after the new one is in place.
    let previous = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .and_then(|u| u.avatar_path);

    let user = UserRepo::set_avatar(&state.pool, auth.user_id, Some(&public_path))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    if let Some(old_path) = previous {
        remove_stored_file(&state.config.upload_dir, &old_path).await;
    }

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// DELETE /api/v1/users/profile/image
///
/// Clears the avatar reference and removes the file best-effort. 204.
pub async fn delete_avatar(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    if let Some(path) = &user.avatar_path {
        remove_stored_file(&state.config.upload_dir, path).await;
    }
    UserRepo::set_avatar(&state.pool, auth.user_id, None).await?;

    Ok(StatusCode::NO_CONTENT)
}
