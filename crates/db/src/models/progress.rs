//! Progress entity model.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One record per (student, course) pair, created at enrollment.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Progress {
    pub id: DbId,
    pub course_id: DbId,
    pub student_id: DbId,
    /// Denormalized course lesson count; refreshed lazily.
    pub total_lessons: i32,
    /// `round(100 * completed / total_lessons)` as of the last touch.
    pub progress_percentage: i32,
    pub last_accessed_at: Timestamp,
    pub created_at: Timestamp,
}

/// A single completed lesson within a progress record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LessonCompletion {
    pub id: DbId,
    pub progress_id: DbId,
    pub lesson_index: i32,
    pub completed_at: Timestamp,
}
