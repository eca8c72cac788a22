//! Repository for platform and course announcements.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::{
    Announcement, CourseAnnouncement, CreateAnnouncement, CreateCourseAnnouncement,
    UpdateAnnouncement,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, created_by, created_at";

const COURSE_COLUMNS: &str = "id, course_id, title, content, created_at";

/// Announcement operations, both platform-wide and per-course.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// Insert a platform announcement, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (title, content, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// List platform announcements, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements ORDER BY created_at DESC");
        sqlx::query_as::<_, Announcement>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update to a platform announcement.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                content = COALESCE($3, content)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a platform announcement.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert an in-course announcement, returning the created row.
    pub async fn create_for_course(
        pool: &PgPool,
        input: &CreateCourseAnnouncement,
    ) -> Result<CourseAnnouncement, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_announcements (course_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, CourseAnnouncement>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List a course's announcements, newest first.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseAnnouncement>, sqlx::Error> {
        let query = format!(
            "SELECT {COURSE_COLUMNS} FROM course_announcements
             WHERE course_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CourseAnnouncement>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an in-course announcement, scoped to its course.
    pub async fn delete_for_course(
        pool: &PgPool,
        course_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM course_announcements WHERE id = $1 AND course_id = $2")
                .bind(id)
                .bind(course_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
