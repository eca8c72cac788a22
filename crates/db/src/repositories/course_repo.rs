//! Repository for the `courses` table and its lesson list.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseFilter, CreateCourse, UpdateCourse};
use crate::models::lesson::LessonInput;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category_id, level, duration_hours, price_cents, \
                        instructor_id, status, rejection_reason, approved_by, approved_at, \
                        submitted_at, created_at, updated_at";

/// Provides CRUD and lifecycle operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course in `draft` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (title, description, category_id, level, duration_hours, price_cents, instructor_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.level)
            .bind(input.duration_hours)
            .bind(input.price_cents)
            .bind(input.instructor_id)
            .fetch_one(pool)
            .await
    }

    /// Find a course by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public catalog listing: approved courses only, with optional
    /// category / level / title-substring filters.
    pub async fn list_approved(
        pool: &PgPool,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE status = 'approved'
               AND ($1::bigint IS NULL OR category_id = $1)
               AND ($2::text IS NULL OR level = $2)
               AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(filter.category_id)
            .bind(&filter.level)
            .bind(&filter.search)
            .fetch_all(pool)
            .await
    }

    /// List a teacher's own courses, most recent first.
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses WHERE instructor_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await
    }

    /// Admin listing across all statuses, optionally filtered by one.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields in `input` are
    /// applied; allow-list filtering for approved courses happens in the
    /// handler before this is called.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category_id = COALESCE($4, category_id),
                level = COALESCE($5, level),
                duration_hours = COALESCE($6, duration_hours),
                price_cents = COALESCE($7, price_cents),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.level)
            .bind(input.duration_hours)
            .bind(input.price_cents)
            .fetch_optional(pool)
            .await
    }

    /// Submit a draft for review. Gated on `status = 'draft'` in SQL so a
    /// concurrent double-submit loses cleanly (returns `None`).
    pub async fn submit(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                status = 'pending',
                submitted_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approve a pending course, recording the approver and timestamp.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        approved_by: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                status = 'approved',
                approved_by = $2,
                approved_at = NOW(),
                rejection_reason = NULL,
                updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(approved_by)
            .fetch_optional(pool)
            .await
    }

    /// Reject a pending course with a reason.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                status = 'rejected',
                rejection_reason = $2,
                updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a course. Enrollments, progress, questions, reviews and
    /// course announcements cascade via foreign keys; payment log entries
    /// survive with a nulled course reference.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a course's lesson list and propagate the new count to every
    /// progress record for the course, all in one transaction.
    ///
    /// The bulk update touches `total_lessons` only: stored percentages
    /// stay stale until each record's next completion or detail read.
    /// Returns the new lesson count.
    pub async fn replace_lessons(
        pool: &PgPool,
        course_id: DbId,
        lessons: &[LessonInput],
    ) -> Result<i64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM lessons WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

        for (position, lesson) in lessons.iter().enumerate() {
            sqlx::query(
                "INSERT INTO lessons (course_id, position, title, content, video_path, duration_minutes)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(course_id)
            .bind(position as i32)
            .bind(&lesson.title)
            .bind(&lesson.content)
            .bind(&lesson.video_path)
            .bind(lesson.duration_minutes)
            .execute(&mut *tx)
            .await?;
        }

        let total = lessons.len() as i64;
        sqlx::query("UPDATE progress SET total_lessons = $2 WHERE course_id = $1")
            .bind(course_id)
            .bind(total as i32)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(course_id, total, "Lesson list replaced; progress totals updated");
        Ok(total)
    }
}
