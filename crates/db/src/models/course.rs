//! Course entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full course row from the `courses` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category_id: Option<DbId>,
    pub level: String,
    pub duration_hours: i32,
    pub price_cents: i64,
    pub instructor_id: DbId,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new course (always starts as `draft`).
#[derive(Debug)]
pub struct CreateCourse {
    pub title: String,
    pub description: String,
    pub category_id: Option<DbId>,
    pub level: String,
    pub duration_hours: i32,
    pub price_cents: i64,
    pub instructor_id: DbId,
}

/// DTO for partial course updates. Only non-`None` fields are applied; the
/// handler is responsible for allow-list filtering on approved courses.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub level: Option<String>,
    pub duration_hours: Option<i32>,
    pub price_cents: Option<i64>,
}

/// Filter for the public approved-course listing.
#[derive(Debug, Default)]
pub struct CourseFilter {
    pub category_id: Option<DbId>,
    pub level: Option<String>,
    /// Case-insensitive substring match against the title.
    pub search: Option<String>,
}
