//! Platform and course announcement models and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Platform-wide broadcast, authored by an admin.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateAnnouncement {
    pub title: String,
    pub content: String,
    pub created_by: DbId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// In-course announcement, authored by the course's teacher.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CourseAnnouncement {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateCourseAnnouncement {
    pub course_id: DbId,
    pub title: String,
    pub content: String,
}
