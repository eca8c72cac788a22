//! Handlers for the `/admin` resource: dashboard, user moderation, course
//! moderation, and teacher-application review.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::Json;
use campus_core::application::{self, ApplicationStatus};
use campus_core::course::{self, CourseStatus};
use campus_core::error::CoreError;
use campus_core::roles::{self, Role};
use campus_core::types::DbId;
use campus_db::models::user::UserResponse;
use campus_db::repositories::{CourseRepo, DashboardRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Optional stored-role filter.
    pub role: Option<String>,
}

/// Query parameters for `GET /admin/courses`.
#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    /// Optional status filter (`draft`, `pending`, `approved`, `rejected`).
    pub status: Option<String>,
}

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}/ban` and course/application
/// rejections.
#[derive(Debug, Deserialize)]
pub struct ReasonRequest {
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<serde_json::Value>> {
    let overview = DashboardRepo::admin_overview(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": overview })))
}

// ---------------------------------------------------------------------------
// User moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(role) = &params.role {
        Role::parse(role)?;
    }
    let users = UserRepo::list(&state.pool, params.role.as_deref()).await?;
    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(serde_json::json!({ "data": responses })))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Change a user's stored role directly. `pending_teacher` cannot be
/// assigned this way; it only exists via the application workflow.
pub async fn set_user_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let role = Role::parse(&input.role)?;
    roles::validate_assignable_role(role)?;

    let user = UserRepo::set_role(&state.pool, id, role.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, role = role.as_str(), "User role changed");
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/admin/users/{id}/ban
///
/// Ban a user with a reason. Takes effect on live tokens immediately (the
/// auth extractor re-checks ban state). Admins cannot ban themselves.
pub async fn ban_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ReasonRequest>,
) -> AppResult<Json<UserResponse>> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A ban reason is required".into(),
        )));
    }
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot ban your own account".into(),
        )));
    }

    let user = UserRepo::ban(&state.pool, id, input.reason.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, "User banned");
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/admin/users/{id}/unban
pub async fn unban_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::unban(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, "User unbanned");
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Course moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/courses
pub async fn list_courses(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<CourseListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(status) = &params.status {
        CourseStatus::parse(status)?;
    }
    let courses = CourseRepo::list_all(&state.pool, params.status.as_deref()).await?;
    Ok(Json(serde_json::json!({ "data": courses })))
}

/// PUT /api/v1/admin/courses/{id}/approve
///
/// Approve a course. Legal only from `pending`; the approver and
/// timestamp are recorded on the course row.
pub async fn approve_course(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let existing = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    course::validate_review_transition(CourseStatus::parse(&existing.status)?)?;

    let course = CourseRepo::approve(&state.pool, id, admin.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Course is no longer pending".into()))
        })?;

    tracing::info!(course_id = id, admin_id = admin.user_id, "Course approved");
    Ok(Json(serde_json::json!({ "data": course })))
}

/// PUT /api/v1/admin/courses/{id}/reject
///
/// Reject a pending course with a required reason.
pub async fn reject_course(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ReasonRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A rejection reason is required".into(),
        )));
    }

    let existing = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    course::validate_review_transition(CourseStatus::parse(&existing.status)?)?;

    let course = CourseRepo::reject(&state.pool, id, input.reason.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Course is no longer pending".into()))
        })?;

    tracing::info!(course_id = id, admin_id = admin.user_id, "Course rejected");
    Ok(Json(serde_json::json!({ "data": course })))
}

// ---------------------------------------------------------------------------
// Teacher-application review
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/teacher-applications
///
/// Pending applicants, oldest application first.
pub async fn list_applications(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<serde_json::Value>> {
    let users = UserRepo::list_pending_teachers(&state.pool).await?;
    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(serde_json::json!({ "data": responses })))
}

/// PUT /api/v1/admin/teacher-applications/{id}/approve
///
/// Promote a pending applicant to `teacher`. The applicant's live token
/// keeps its student capabilities; elevated claims require a fresh login.
pub async fn approve_application(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = resolve_application(&state, &admin, id, true, None).await?;
    tracing::info!(user_id = id, "Teacher application approved");
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/admin/teacher-applications/{id}/reject
///
/// Reject a pending applicant: the stored role reverts to `student` and
/// the reason is recorded.
pub async fn reject_application(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ReasonRequest>,
) -> AppResult<Json<UserResponse>> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A rejection reason is required".into(),
        )));
    }
    let user = resolve_application(&state, &admin, id, false, Some(input.reason.trim())).await?;
    tracing::info!(user_id = id, "Teacher application rejected");
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shared approve/reject flow for teacher applications.
async fn resolve_application(
    state: &AppState,
    admin: &crate::middleware::auth::AuthUser,
    id: DbId,
    approve: bool,
    rejection_reason: Option<&str>,
) -> AppResult<campus_db::models::user::User> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    application::validate_reviewable(Role::parse(&target.role)?)?;

    let new_role = application::resolved_role(approve);
    let status = if approve {
        ApplicationStatus::Approved
    } else {
        ApplicationStatus::Rejected
    };

    UserRepo::review_application(
        &state.pool,
        id,
        new_role.as_str(),
        status.as_str(),
        admin.user_id,
        rejection_reason,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Application has already been reviewed".into(),
        ))
    })
}
