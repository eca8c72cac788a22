//! Route definitions for the `/courses` resource: public catalog plus
//! student course actions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET  /                     -> list_courses (public, approved only)
/// GET  /{id}                 -> get_course (public, approved only)
/// POST /{id}/enroll          -> enroll (student)
/// POST /{id}/complete-lesson -> complete_lesson (student)
/// POST /{id}/ask-question    -> ask_question (student, enrolled)
/// PUT  /{id}/review          -> upsert_review (student, enrolled)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses))
        .route("/{id}", get(courses::get_course))
        .route("/{id}/enroll", post(courses::enroll))
        .route("/{id}/complete-lesson", post(courses::complete_lesson))
        .route("/{id}/ask-question", post(courses::ask_question))
        .route("/{id}/review", put(courses::upsert_review))
}
