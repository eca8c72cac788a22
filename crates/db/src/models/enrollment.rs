//! Enrollment entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::payment::NewPayment;

/// Enrollment row: the link between a student and a course.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Enrollment {
    pub id: DbId,
    pub course_id: DbId,
    pub student_id: DbId,
    pub enrolled_at: Timestamp,
}

/// Input for the transactional enrollment workflow.
#[derive(Debug)]
pub struct EnrollCourse {
    pub course_id: DbId,
    pub student_id: DbId,
    /// Lesson count at enrollment time, copied into the progress record.
    pub total_lessons: i64,
    /// Present only for priced courses.
    pub payment: Option<NewPayment>,
}

/// Join row for a teacher's per-course student/progress listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentProgressRow {
    pub student_id: DbId,
    pub name: String,
    pub email: String,
    pub enrolled_at: Timestamp,
    pub total_lessons: i32,
    pub progress_percentage: i32,
    pub last_accessed_at: Timestamp,
}
