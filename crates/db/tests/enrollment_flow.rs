//! Repository-level tests for the transactional enrollment flow, the
//! unique-index backstops, and lesson-count propagation.

use campus_db::models::course::CreateCourse;
use campus_db::models::enrollment::EnrollCourse;
use campus_db::models::lesson::LessonInput;
use campus_db::models::payment::NewPayment;
use campus_db::models::review::UpsertReview;
use campus_db::models::user::CreateUser;
use campus_db::repositories::{CourseRepo, EnrollmentRepo, ProgressRepo, ReviewRepo, UserRepo};
use campus_core::types::DbId;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, name: &str, role: &str) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@test.com"),
            password_hash: "$argon2id$fake".to_string(),
            role: role.to_string(),
            application_status: None,
        },
    )
    .await
    .expect("user should insert");
    user.id
}

async fn seed_course(pool: &PgPool, instructor_id: DbId, lessons: usize) -> DbId {
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            title: "Knife Sharpening".to_string(),
            description: String::new(),
            category_id: None,
            level: "beginner".to_string(),
            duration_hours: 2,
            price_cents: 0,
            instructor_id,
        },
    )
    .await
    .expect("course should insert");

    let inputs: Vec<LessonInput> = (0..lessons)
        .map(|i| LessonInput {
            title: format!("Lesson {i}"),
            content: String::new(),
            video_path: None,
            duration_minutes: 5,
        })
        .collect();
    CourseRepo::replace_lessons(pool, course.id, &inputs)
        .await
        .expect("lessons should insert");
    course.id
}

/// Free enrollment writes the enrollment and a zeroed progress record and
/// no payment.
#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_free_creates_enrollment_and_progress(pool: PgPool) {
    let teacher = seed_user(&pool, "teach", "teacher").await;
    let student = seed_user(&pool, "alice", "student").await;
    let course_id = seed_course(&pool, teacher, 4).await;

    let (enrollment, payment) = EnrollmentRepo::enroll(
        &pool,
        &EnrollCourse {
            course_id,
            student_id: student,
            total_lessons: 4,
            payment: None,
        },
    )
    .await
    .expect("enroll should succeed");

    assert_eq!(enrollment.course_id, course_id);
    assert!(payment.is_none());

    let progress = ProgressRepo::find_by_course_and_student(&pool, course_id, student)
        .await
        .unwrap()
        .expect("progress should exist");
    assert_eq!(progress.total_lessons, 4);
    assert_eq!(progress.progress_percentage, 0);
}

/// Paid enrollment writes a payment with the amount copied at enrollment
/// time, in the same transaction.
#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_paid_writes_payment(pool: PgPool) {
    let teacher = seed_user(&pool, "teach", "teacher").await;
    let student = seed_user(&pool, "alice", "student").await;
    let course_id = seed_course(&pool, teacher, 2).await;

    let (_, payment) = EnrollmentRepo::enroll(
        &pool,
        &EnrollCourse {
            course_id,
            student_id: student,
            total_lessons: 2,
            payment: Some(NewPayment {
                user_id: student,
                course_id,
                amount_cents: 29900,
                method: "bank_transfer".to_string(),
                status: "pending".to_string(),
                details: serde_json::json!({ "iban_last4": "1234" }),
                transaction_id: "TXN-test-0001".to_string(),
            }),
        },
    )
    .await
    .expect("enroll should succeed");

    let payment = payment.expect("payment should be created");
    assert_eq!(payment.amount_cents, 29900);
    assert_eq!(payment.status, "pending");
    assert_eq!(payment.course_id, Some(course_id));
}

/// The unique (course, student) index refuses a double enrollment even
/// when the friendly pre-check is skipped.
#[sqlx::test(migrations = "./migrations")]
async fn test_double_enroll_hits_unique_index(pool: PgPool) {
    let teacher = seed_user(&pool, "teach", "teacher").await;
    let student = seed_user(&pool, "alice", "student").await;
    let course_id = seed_course(&pool, teacher, 2).await;

    let input = EnrollCourse {
        course_id,
        student_id: student,
        total_lessons: 2,
        payment: None,
    };
    EnrollmentRepo::enroll(&pool, &input)
        .await
        .expect("first enroll should succeed");

    let result = EnrollmentRepo::enroll(&pool, &input).await;
    assert_matches::assert_matches!(
        result,
        Err(sqlx::Error::Database(_)),
        "second enroll must violate uq index"
    );

    // The failed transaction must not leave a second progress record.
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM progress WHERE course_id = $1 AND student_id = $2")
            .bind(course_id)
            .bind(student)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

/// The review upsert never produces a second row for the same pair.
#[sqlx::test(migrations = "./migrations")]
async fn test_review_upsert_single_row(pool: PgPool) {
    let teacher = seed_user(&pool, "teach", "teacher").await;
    let student = seed_user(&pool, "alice", "student").await;
    let course_id = seed_course(&pool, teacher, 2).await;

    let first = ReviewRepo::upsert(
        &pool,
        &UpsertReview {
            course_id,
            student_id: student,
            rating: 5,
            comment: "Great".to_string(),
        },
    )
    .await
    .unwrap();

    let second = ReviewRepo::upsert(
        &pool,
        &UpsertReview {
            course_id,
            student_id: student,
            rating: 3,
            comment: "Okay on reflection".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id, "same row overwritten");
    assert_eq!(second.rating, 3);

    let all = ReviewRepo::list_by_course(&pool, course_id).await.unwrap();
    assert_eq!(all.len(), 1);
}

/// Replacing the lesson list bulk-updates `total_lessons` on existing
/// progress records without recomputing the stored percentage.
#[sqlx::test(migrations = "./migrations")]
async fn test_replace_lessons_propagates_total_only(pool: PgPool) {
    let teacher = seed_user(&pool, "teach", "teacher").await;
    let student = seed_user(&pool, "alice", "student").await;
    let course_id = seed_course(&pool, teacher, 3).await;

    EnrollmentRepo::enroll(
        &pool,
        &EnrollCourse {
            course_id,
            student_id: student,
            total_lessons: 3,
            payment: None,
        },
    )
    .await
    .unwrap();

    // Simulate 1/3 completed.
    let progress = ProgressRepo::find_by_course_and_student(&pool, course_id, student)
        .await
        .unwrap()
        .unwrap();
    ProgressRepo::add_completion(&pool, progress.id, 0).await.unwrap();
    ProgressRepo::update_totals(&pool, progress.id, 3, 33).await.unwrap();

    // Grow the course to 5 lessons.
    let inputs: Vec<LessonInput> = (0..5)
        .map(|i| LessonInput {
            title: format!("Lesson {i}"),
            content: String::new(),
            video_path: None,
            duration_minutes: 5,
        })
        .collect();
    let total = CourseRepo::replace_lessons(&pool, course_id, &inputs).await.unwrap();
    assert_eq!(total, 5);

    let progress = ProgressRepo::find_by_course_and_student(&pool, course_id, student)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.total_lessons, 5, "total refreshed in bulk");
    assert_eq!(progress.progress_percentage, 33, "percentage left stale");
}
