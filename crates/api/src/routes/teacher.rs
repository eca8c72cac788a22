//! Route definitions for the `/teacher` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use campus_core::uploads::MAX_VIDEO_BYTES;

use crate::handlers::teacher;
use crate::state::AppState;

/// Routes mounted at `/teacher`. All require the teacher (or admin)
/// effective role, enforced by handler extractors; ownership of the course
/// is checked per handler.
///
/// ```text
/// GET    /courses                                -> list_courses
/// POST   /courses                                -> create_course
/// GET    /courses/{id}                           -> get_course
/// PUT    /courses/{id}                           -> update_course
/// DELETE /courses/{id}                           -> delete_course
/// POST   /courses/{id}/submit                    -> submit_course
/// GET    /courses/{id}/students                  -> list_students
/// GET    /courses/{id}/announcements             -> list_announcements
/// POST   /courses/{id}/announcements             -> create_announcement
/// DELETE /courses/{id}/announcements/{aid}       -> delete_announcement
/// POST   /courses/{id}/lessons/{index}/video     -> upload_lesson_video (multipart)
/// GET    /questions                              -> list_questions (?unanswered_only)
/// PUT    /questions/{id}/answer                  -> answer_question
/// GET    /earnings                               -> earnings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/courses",
            get(teacher::list_courses).post(teacher::create_course),
        )
        .route(
            "/courses/{id}",
            get(teacher::get_course)
                .put(teacher::update_course)
                .delete(teacher::delete_course),
        )
        .route("/courses/{id}/submit", post(teacher::submit_course))
        .route("/courses/{id}/students", get(teacher::list_students))
        .route(
            "/courses/{id}/announcements",
            get(teacher::list_announcements).post(teacher::create_announcement),
        )
        .route(
            "/courses/{id}/announcements/{aid}",
            axum::routing::delete(teacher::delete_announcement),
        )
        .route(
            "/courses/{id}/lessons/{index}/video",
            post(teacher::upload_lesson_video)
                // Allow a little slack above the video cap for multipart framing.
                .layer(DefaultBodyLimit::max(MAX_VIDEO_BYTES + 1024 * 1024)),
        )
        .route("/questions", get(teacher::list_questions))
        .route("/questions/{id}/answer", put(teacher::answer_question))
        .route("/earnings", get(teacher::earnings))
}
