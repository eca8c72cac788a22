//! Handlers for platform announcements: public listing plus admin CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};
use campus_db::repositories::AnnouncementRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/announcements`.
#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    pub title: String,
    pub content: String,
}

/// GET /api/v1/announcements
///
/// Public listing of platform announcements, newest first.
pub async fn list_announcements(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let announcements = AnnouncementRepo::list(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": announcements })))
}

/// POST /api/v1/admin/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<AnnouncementRequest>,
) -> AppResult<(StatusCode, Json<Announcement>)> {
    if input.title.trim().is_empty() || input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Announcement title and content must not be empty".into(),
        )));
    }

    let announcement = AnnouncementRepo::create(
        &state.pool,
        &CreateAnnouncement {
            title: input.title.trim().to_string(),
            content: input.content,
            created_by: admin.user_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// PUT /api/v1/admin/announcements/{id}
pub async fn update_announcement(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnouncement>,
) -> AppResult<Json<Announcement>> {
    let announcement = AnnouncementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    Ok(Json(announcement))
}

/// DELETE /api/v1/admin/announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AnnouncementRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))
    }
}
