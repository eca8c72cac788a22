//! Repository for the `reviews` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{Review, UpsertReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, student_id, rating, comment, created_at, updated_at";

/// Review operations.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert or overwrite the (course, student) review. The unique index
    /// guarantees the pair never produces two rows; a second submission
    /// replaces rating and comment and bumps `updated_at` only.
    pub async fn upsert(pool: &PgPool, input: &UpsertReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (course_id, student_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (course_id, student_id)
             DO UPDATE SET rating = EXCLUDED.rating,
                           comment = EXCLUDED.comment,
                           updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.course_id)
            .bind(input.student_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a student's review of a course.
    pub async fn find_by_course_and_student(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE course_id = $1 AND student_id = $2");
        sqlx::query_as::<_, Review>(&query)
            .bind(course_id)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's reviews, newest first.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE course_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Review>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Average rating for a course, `None` when unreviewed.
    pub async fn average_rating(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar("SELECT AVG(rating)::float8 FROM reviews WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await
    }
}
