//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
/// Category and announcement CRUD are mounted separately at
/// `/admin/categories` and `/admin/announcements`.
///
/// ```text
/// GET /dashboard                          -> dashboard
/// GET /users                              -> list_users (?role)
/// PUT /users/{id}/role                    -> set_user_role
/// PUT /users/{id}/ban                     -> ban_user
/// PUT /users/{id}/unban                   -> unban_user
/// GET /courses                            -> list_courses (?status)
/// PUT /courses/{id}/approve               -> approve_course
/// PUT /courses/{id}/reject                -> reject_course
/// GET /teacher-applications               -> list_applications
/// PUT /teacher-applications/{id}/approve  -> approve_application
/// PUT /teacher-applications/{id}/reject   -> reject_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", put(admin::set_user_role))
        .route("/users/{id}/ban", put(admin::ban_user))
        .route("/users/{id}/unban", put(admin::unban_user))
        .route("/courses", get(admin::list_courses))
        .route("/courses/{id}/approve", put(admin::approve_course))
        .route("/courses/{id}/reject", put(admin::reject_course))
        .route("/teacher-applications", get(admin::list_applications))
        .route(
            "/teacher-applications/{id}/approve",
            put(admin::approve_application),
        )
        .route(
            "/teacher-applications/{id}/reject",
            put(admin::reject_application),
        )
}
