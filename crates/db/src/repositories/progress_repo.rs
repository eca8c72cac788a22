//! Repository for the `progress` and `lesson_completions` tables.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress::{LessonCompletion, Progress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, course_id, student_id, total_lessons, progress_percentage, last_accessed_at, created_at";

const COMPLETION_COLUMNS: &str = "id, progress_id, lesson_index, completed_at";

/// Progress tracking operations.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Find the progress record for a (course, student) pair.
    pub async fn find_by_course_and_student(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<Option<Progress>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM progress WHERE course_id = $1 AND student_id = $2");
        sqlx::query_as::<_, Progress>(&query)
            .bind(course_id)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// List a progress record's completions in lesson order.
    pub async fn completions(
        pool: &PgPool,
        progress_id: DbId,
    ) -> Result<Vec<LessonCompletion>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLETION_COLUMNS} FROM lesson_completions
             WHERE progress_id = $1 ORDER BY lesson_index ASC"
        );
        sqlx::query_as::<_, LessonCompletion>(&query)
            .bind(progress_id)
            .fetch_all(pool)
            .await
    }

    /// Number of completed lessons for a progress record.
    pub async fn completed_count(pool: &PgPool, progress_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM lesson_completions WHERE progress_id = $1")
            .bind(progress_id)
            .fetch_one(pool)
            .await
    }

    /// Whether a lesson index is already completed.
    pub async fn is_completed(
        pool: &PgPool,
        progress_id: DbId,
        lesson_index: i32,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM lesson_completions
                           WHERE progress_id = $1 AND lesson_index = $2)",
        )
        .bind(progress_id)
        .bind(lesson_index)
        .fetch_one(pool)
        .await
    }

    /// Record a completion. `ON CONFLICT DO NOTHING` keeps repeated
    /// completion of the same index a no-op even under a race.
    pub async fn add_completion(
        pool: &PgPool,
        progress_id: DbId,
        lesson_index: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO lesson_completions (progress_id, lesson_index)
             VALUES ($1, $2)
             ON CONFLICT (progress_id, lesson_index) DO NOTHING",
        )
        .bind(progress_id)
        .bind(lesson_index)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Refresh the denormalized totals and touch `last_accessed_at`.
    pub async fn update_totals(
        pool: &PgPool,
        id: DbId,
        total_lessons: i32,
        progress_percentage: i32,
    ) -> Result<Progress, sqlx::Error> {
        let query = format!(
            "UPDATE progress SET
                total_lessons = $2,
                progress_percentage = $3,
                last_accessed_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(id)
            .bind(total_lessons)
            .bind(progress_percentage)
            .fetch_one(pool)
            .await
    }
}
