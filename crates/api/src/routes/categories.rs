//! Route definitions for categories: a public listing and an admin CRUD
//! surface.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use campus_core::uploads::MAX_IMAGE_BYTES;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories` (public).
///
/// ```text
/// GET /  -> list_categories
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(categories::list_categories))
}

/// Routes mounted at `/admin/categories` (admin only, enforced by handler
/// extractors).
///
/// ```text
/// POST   /            -> create_category
/// PUT    /{id}        -> update_category
/// DELETE /{id}        -> delete_category
/// POST   /{id}/image  -> upload_image (multipart)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(categories::create_category))
        .route(
            "/{id}",
            axum::routing::put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/{id}/image",
            post(categories::upload_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024)),
        )
}
