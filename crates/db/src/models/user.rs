//! User entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and reset-token hash -- NEVER serialize this
/// to API responses directly. Use [`UserResponse`] for external-facing
/// output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub application_status: Option<String>,
    pub applied_at: Option<Timestamp>,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
    pub application_rejection_reason: Option<String>,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub banned_at: Option<Timestamp>,
    pub avatar_path: Option<String>,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no credential material).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    /// Stored role (`"student"`, `"teacher"`, `"admin"`, `"pending_teacher"`).
    pub role: String,
    pub application_status: Option<String>,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub avatar_path: Option<String>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            application_status: user.application_status.clone(),
            is_banned: user.is_banned,
            ban_reason: user.ban_reason.clone(),
            avatar_path: user.avatar_path.clone(),
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user at registration.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Stored role; `pending_teacher` for teacher registrations.
    pub role: String,
    /// `Some("pending")` when the registration opens a teacher application.
    pub application_status: Option<String>,
}

/// DTO for self-service profile updates. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}
