//! Route definitions for the `/users` resource (own profile).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use campus_core::uploads::MAX_IMAGE_BYTES;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All require authentication.
///
/// ```text
/// GET  /profile          -> get_profile
/// PUT  /profile          -> update_profile
/// PUT  /change-password  -> change_password
/// POST /profile/image    -> upload_avatar (multipart)
/// DELETE /profile/image  -> delete_avatar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/change-password", put(users::change_password))
        .route(
            "/profile/image",
            post(users::upload_avatar)
                .delete(users::delete_avatar)
                // Allow a little slack above the image cap for multipart framing.
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024)),
        )
}
