//! Repository for the `lessons` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson::Lesson;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, position, title, content, video_path, duration_minutes";

/// Read and video-attachment operations for lessons. Lesson list
/// replacement lives in `CourseRepo::replace_lessons`, which owns the
/// progress propagation that must ride the same transaction.
pub struct LessonRepo;

impl LessonRepo {
    /// List a course's lessons in positional order.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Lesson>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM lessons WHERE course_id = $1 ORDER BY position ASC");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Current lesson count for a course.
    pub async fn count_by_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Find a lesson by its 0-based position within a course.
    pub async fn find_by_position(
        pool: &PgPool,
        course_id: DbId,
        position: i32,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM lessons WHERE course_id = $1 AND position = $2");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(course_id)
            .bind(position)
            .fetch_optional(pool)
            .await
    }

    /// Attach an uploaded video to a lesson. Returns `true` if a lesson at
    /// that position exists.
    pub async fn set_video_path(
        pool: &PgPool,
        course_id: DbId,
        position: i32,
        video_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE lessons SET video_path = $3 WHERE course_id = $1 AND position = $2")
                .bind(course_id)
                .bind(position)
                .bind(video_path)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
