//! Route definitions for the `/student` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::student;
use crate::state::AppState;

/// Routes mounted at `/student`. All require the student effective role.
///
/// ```text
/// GET /dashboard                        -> dashboard
/// GET /courses/{id}                     -> course_detail
/// GET /courses/{id}/lessons/{index}     -> lesson_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(student::dashboard))
        .route("/courses/{id}", get(student::course_detail))
        .route(
            "/courses/{id}/lessons/{index}",
            get(student::lesson_content),
        )
}
