//! Question entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A student question against a lesson, with its optional embedded answer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub id: DbId,
    pub course_id: DbId,
    pub lesson_index: i32,
    pub student_id: DbId,
    pub title: String,
    pub content: String,
    pub answer_content: Option<String>,
    pub answered_by: Option<DbId>,
    pub answered_at: Option<Timestamp>,
    pub is_answered: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a question.
#[derive(Debug)]
pub struct CreateQuestion {
    pub course_id: DbId,
    pub lesson_index: i32,
    pub student_id: DbId,
    pub title: String,
    pub content: String,
}
