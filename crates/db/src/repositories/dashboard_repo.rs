//! Aggregate queries for the admin dashboard, the teacher earnings report,
//! and the student dashboard.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::{AdminDashboard, CourseEarningsRow, StudentCourseRow};

/// Read-only aggregate queries. Nothing here is persisted; derived numbers
/// (percentages, fee splits) are computed by the caller from these rows.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Platform-wide counters for the admin dashboard.
    pub async fn admin_overview(pool: &PgPool) -> Result<AdminDashboard, sqlx::Error> {
        let total_students: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'student'")
                .fetch_one(pool)
                .await?;
        let total_teachers: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'teacher'")
                .fetch_one(pool)
                .await?;
        let pending_teacher_applications: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'pending_teacher'")
                .fetch_one(pool)
                .await?;
        let total_courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(pool)
            .await?;
        let pending_courses: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE status = 'pending'")
                .fetch_one(pool)
                .await?;
        let approved_courses: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE status = 'approved'")
                .fetch_one(pool)
                .await?;
        let total_enrollments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments")
            .fetch_one(pool)
            .await?;
        // SUM over bigint yields numeric; cast back for a clean i64 decode.
        let total_revenue_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0)::bigint FROM payments WHERE status = 'completed'",
        )
        .fetch_one(pool)
        .await?;

        Ok(AdminDashboard {
            total_students,
            total_teachers,
            pending_teacher_applications,
            total_courses,
            pending_courses,
            approved_courses,
            total_enrollments,
            total_revenue_cents,
        })
    }

    /// Per-course gross revenue (completed payments only) for a teacher's
    /// earnings report.
    pub async fn instructor_earnings(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<CourseEarningsRow>, sqlx::Error> {
        sqlx::query_as::<_, CourseEarningsRow>(
            "SELECT c.id AS course_id, c.title,
                    COUNT(p.id) AS sales,
                    COALESCE(SUM(p.amount_cents), 0)::bigint AS gross_cents
             FROM courses c
             LEFT JOIN payments p ON p.course_id = c.id AND p.status = 'completed'
             WHERE c.instructor_id = $1
             GROUP BY c.id, c.title
             ORDER BY gross_cents DESC",
        )
        .bind(instructor_id)
        .fetch_all(pool)
        .await
    }

    /// Enrolled courses joined with progress for the student dashboard.
    pub async fn student_courses(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<StudentCourseRow>, sqlx::Error> {
        sqlx::query_as::<_, StudentCourseRow>(
            "SELECT c.id AS course_id, c.title, c.level,
                    u.name AS instructor_name,
                    e.enrolled_at,
                    p.total_lessons, p.progress_percentage, p.last_accessed_at
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             JOIN users u ON u.id = c.instructor_id
             JOIN progress p ON p.course_id = e.course_id AND p.student_id = e.student_id
             WHERE e.student_id = $1
             ORDER BY p.last_accessed_at DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }
}
