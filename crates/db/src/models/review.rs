//! Review entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One review per (course, student); a second submission overwrites.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: DbId,
    pub course_id: DbId,
    pub student_id: DbId,
    pub rating: i32,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the review upsert.
#[derive(Debug)]
pub struct UpsertReview {
    pub course_id: DbId,
    pub student_id: DbId,
    pub rating: i32,
    pub comment: String,
}
