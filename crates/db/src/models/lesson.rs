//! Lesson entity model and DTOs.

use campus_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lesson row; `position` is the 0-based lesson index within its course.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Lesson {
    pub id: DbId,
    pub course_id: DbId,
    pub position: i32,
    pub title: String,
    pub content: String,
    pub video_path: Option<String>,
    pub duration_minutes: i32,
}

/// One entry of a course's replacement lesson list.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub video_path: Option<String>,
    #[serde(default)]
    pub duration_minutes: i32,
}
