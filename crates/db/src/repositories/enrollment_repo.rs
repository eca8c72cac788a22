//! Repository for the `enrollments` table and the transactional
//! enrollment workflow.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{EnrollCourse, Enrollment, StudentProgressRow};
use crate::models::payment::Payment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, student_id, enrolled_at";

const PAYMENT_COLUMNS: &str = "id, user_id, course_id, amount_cents, method, status, details, \
                                transaction_id, created_at";

/// Enrollment operations, including the single-transaction enroll flow.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Whether a student is already enrolled in a course.
    pub async fn exists(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE course_id = $1 AND student_id = $2)",
        )
        .bind(course_id)
        .bind(student_id)
        .fetch_one(pool)
        .await
    }

    /// Number of students enrolled in a course.
    pub async fn count_by_course(pool: &PgPool, course_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Enroll a student: optional payment record, enrollment row, and a
    /// zero-completion progress record -- all in a single transaction so a
    /// failure at any step leaves no partial state.
    ///
    /// The unique (course_id, student_id) index makes the loser of a
    /// concurrent double-enroll fail with a unique violation here.
    pub async fn enroll(
        pool: &PgPool,
        input: &EnrollCourse,
    ) -> Result<(Enrollment, Option<Payment>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let payment = match &input.payment {
            Some(new_payment) => {
                let query = format!(
                    "INSERT INTO payments
                        (user_id, course_id, amount_cents, method, status, details, transaction_id)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     RETURNING {PAYMENT_COLUMNS}"
                );
                let payment = sqlx::query_as::<_, Payment>(&query)
                    .bind(new_payment.user_id)
                    .bind(new_payment.course_id)
                    .bind(new_payment.amount_cents)
                    .bind(&new_payment.method)
                    .bind(&new_payment.status)
                    .bind(&new_payment.details)
                    .bind(&new_payment.transaction_id)
                    .fetch_one(&mut *tx)
                    .await?;
                Some(payment)
            }
            None => None,
        };

        let query = format!(
            "INSERT INTO enrollments (course_id, student_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let enrollment = sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.course_id)
            .bind(input.student_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO progress (course_id, student_id, total_lessons) VALUES ($1, $2, $3)",
        )
        .bind(input.course_id)
        .bind(input.student_id)
        .bind(input.total_lessons as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((enrollment, payment))
    }

    /// List a course's enrolled students joined with their progress, for
    /// the teacher's roster view.
    pub async fn list_students_with_progress(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<StudentProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, StudentProgressRow>(
            "SELECT u.id AS student_id, u.name, u.email, e.enrolled_at,
                    p.total_lessons, p.progress_percentage, p.last_accessed_at
             FROM enrollments e
             JOIN users u ON u.id = e.student_id
             JOIN progress p ON p.course_id = e.course_id AND p.student_id = e.student_id
             WHERE e.course_id = $1
             ORDER BY e.enrolled_at ASC",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}
