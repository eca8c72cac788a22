//! Route definitions for platform announcements: a public listing and an
//! admin CRUD surface.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::announcements;
use crate::state::AppState;

/// Routes mounted at `/announcements` (public).
///
/// ```text
/// GET /  -> list_announcements
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(announcements::list_announcements))
}

/// Routes mounted at `/admin/announcements` (admin only, enforced by
/// handler extractors).
///
/// ```text
/// POST   /      -> create_announcement
/// PUT    /{id}  -> update_announcement
/// DELETE /{id}  -> delete_announcement
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(announcements::create_announcement))
        .route(
            "/{id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
}
