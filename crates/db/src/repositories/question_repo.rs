//! Repository for the `questions` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, lesson_index, student_id, title, content, answer_content, \
                        answered_by, answered_at, is_answered, created_at";

/// Q&A operations.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new (unanswered) question.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (course_id, lesson_index, student_id, title, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.course_id)
            .bind(input.lesson_index)
            .bind(input.student_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a question by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's questions, newest first.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM questions WHERE course_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Question>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List questions across all of an instructor's courses, optionally
    /// only unanswered ones, oldest first so the backlog drains in order.
    pub async fn list_for_instructor(
        pool: &PgPool,
        instructor_id: DbId,
        unanswered_only: bool,
    ) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            "SELECT q.id, q.course_id, q.lesson_index, q.student_id, q.title, q.content,
                    q.answer_content, q.answered_by, q.answered_at, q.is_answered, q.created_at
             FROM questions q
             JOIN courses c ON c.id = q.course_id
             WHERE c.instructor_id = $1
               AND (NOT $2 OR q.is_answered = FALSE)
             ORDER BY q.created_at ASC",
        )
        .bind(instructor_id)
        .bind(unanswered_only)
        .fetch_all(pool)
        .await
    }

    /// Answer a question. Gated on `is_answered = FALSE` so answering is a
    /// one-way transition even under a race (returns `None` if lost).
    pub async fn answer(
        pool: &PgPool,
        id: DbId,
        answer_content: &str,
        answered_by: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET
                answer_content = $2,
                answered_by = $3,
                answered_at = NOW(),
                is_answered = TRUE
             WHERE id = $1 AND is_answered = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(answer_content)
            .bind(answered_by)
            .fetch_optional(pool)
            .await
    }
}
