//! Aggregate row types for dashboard and earnings queries.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Admin dashboard counters.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub total_students: i64,
    pub total_teachers: i64,
    pub pending_teacher_applications: i64,
    pub total_courses: i64,
    pub pending_courses: i64,
    pub approved_courses: i64,
    pub total_enrollments: i64,
    /// Sum over completed payments, in cents.
    pub total_revenue_cents: i64,
}

/// Per-course gross revenue row for the teacher earnings report.
#[derive(Debug, Clone, FromRow)]
pub struct CourseEarningsRow {
    pub course_id: DbId,
    pub title: String,
    pub sales: i64,
    pub gross_cents: i64,
}

/// Join row for the student dashboard: enrolled course plus progress.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentCourseRow {
    pub course_id: DbId,
    pub title: String,
    pub level: String,
    pub instructor_name: String,
    pub enrolled_at: Timestamp,
    pub total_lessons: i32,
    pub progress_percentage: i32,
    pub last_accessed_at: Timestamp,
}
