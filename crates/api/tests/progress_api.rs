//! HTTP-level integration tests for progress tracking: completion
//! percentage arithmetic, idempotent completion, the bounds check, and the
//! documented staleness window after a lesson-count change.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_json_auth};
use campus_core::types::DbId;
use sqlx::PgPool;

/// Seed teacher + admin + student with an approved 3-lesson course the
/// student is enrolled in. Returns (course_id, teacher_email, student_email).
async fn seed_enrolled(pool: &PgPool, price_cents: i64) -> (DbId, String, String) {
    let teacher = common::create_user(pool, "teach", "teacher").await;
    let admin = common::create_user(pool, "root", "admin").await;
    let student = common::create_user(pool, "alice", "student").await;
    let course = common::create_course_with_lessons(pool, teacher.id, price_cents, 3).await;
    common::approve_course(pool, course.id, admin.id).await;

    let app = common::build_test_app(pool.clone());
    let token = common::login(app.clone(), &student.email).await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/courses/{}/enroll", course.id),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    (course.id, teacher.email.clone(), student.email.clone())
}

/// Completing 1 of 3 lessons yields round(100/3) = 33.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_updates_percentage(pool: PgPool) {
    let (course_id, _, student_email) = seed_enrolled(&pool, 0).await;
    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), &student_email).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/courses/{course_id}/complete-lesson"),
        &token,
        serde_json::json!({ "lesson_index": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["already_completed"], false);
    assert_eq!(json["data"]["progress"]["progress_percentage"], 33);
    assert_eq!(json["data"]["progress"]["total_lessons"], 3);
}

/// Completing the same index twice is a no-op that still succeeds, with a
/// distinguishing message and an unchanged completion count.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_is_idempotent(pool: PgPool) {
    let (course_id, _, student_email) = seed_enrolled(&pool, 0).await;
    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), &student_email).await;
    let uri = format!("/api/v1/courses/{course_id}/complete-lesson");
    let body = serde_json::json!({ "lesson_index": 1 });

    let response = post_json_auth(app.clone(), &uri, &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["data"]["already_completed"], false);

    let response = post_json_auth(app, &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK, "repeat still succeeds");
    let second = body_json(response).await;
    assert_eq!(second["data"]["already_completed"], true);
    assert_eq!(
        second["data"]["progress"]["progress_percentage"],
        first["data"]["progress"]["progress_percentage"],
        "percentage unchanged on repeat"
    );
}

/// An out-of-range lesson index is rejected instead of inflating the
/// percentage.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_out_of_range_index_rejected(pool: PgPool) {
    let (course_id, _, student_email) = seed_enrolled(&pool, 0).await;
    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), &student_email).await;
    let uri = format!("/api/v1/courses/{course_id}/complete-lesson");

    for bad_index in [3, 7, -1] {
        let response = post_json_auth(
            app.clone(),
            &uri,
            &token,
            serde_json::json!({ "lesson_index": bad_index }),
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "index {bad_index} must be rejected"
        );
    }
}

/// Completing a lesson in a course the student never enrolled in is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_requires_enrollment(pool: PgPool) {
    let teacher = common::create_user(&pool, "teach", "teacher").await;
    let admin = common::create_user(&pool, "root", "admin").await;
    let outsider = common::create_user(&pool, "mallory", "student").await;
    let course = common::create_course_with_lessons(&pool, teacher.id, 0, 3).await;
    common::approve_course(&pool, course.id, admin.id).await;

    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), &outsider.email).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/courses/{}/complete-lesson", course.id),
        &token,
        serde_json::json!({ "lesson_index": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Lesson-count change 3 -> 5: the bulk update refreshes `total_lessons`
/// on every progress record but leaves the stored percentage stale; the
/// percentage catches up on the student's next detail read.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_lesson_count_change_staleness_window(pool: PgPool) {
    let (course_id, teacher_email, student_email) = seed_enrolled(&pool, 0).await;
    let app = common::build_test_app(pool);
    let student_token = common::login(app.clone(), &student_email).await;
    let teacher_token = common::login(app.clone(), &teacher_email).await;

    // Student completes 1 of 3 -> 33%.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/complete-lesson"),
        &student_token,
        serde_json::json!({ "lesson_index": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Teacher grows the lesson list to 5.
    let lessons: Vec<serde_json::Value> = (0..5)
        .map(|i| serde_json::json!({ "title": format!("Lesson {i}"), "content": "..." }))
        .collect();
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/teacher/courses/{course_id}"),
        &teacher_token,
        serde_json::json!({ "lessons": lessons }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Roster view: total already 5, percentage still the stale 33.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/teacher/courses/{course_id}/students"),
        &teacher_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let row = &json["data"][0];
    assert_eq!(row["total_lessons"], 5);
    assert_eq!(row["progress_percentage"], 33, "stale until next touch");

    // The student's detail read refreshes: round(100 * 1/5) = 20.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/student/courses/{course_id}"),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"]["total_lessons"], 5);
    assert_eq!(json["data"]["progress"]["progress_percentage"], 20);

    // And the roster now agrees.
    let response = get_auth(
        app,
        &format!("/api/v1/teacher/courses/{course_id}/students"),
        &teacher_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["progress_percentage"], 20);
}

/// Lesson content is gated by enrollment; the dashboard reflects progress.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_lesson_content_gated_and_dashboard(pool: PgPool) {
    let (course_id, _, student_email) = seed_enrolled(&pool, 0).await;
    let outsider = common::create_user(&pool, "mallory", "student").await;
    let app = common::build_test_app(pool);
    let student_token = common::login(app.clone(), &student_email).await;
    let outsider_token = common::login(app.clone(), &outsider.email).await;

    // Enrolled student reads full lesson content.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/student/courses/{course_id}/lessons/0"),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Lesson 0");
    assert!(json["data"]["content"].is_string());

    // Outsider is refused.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/student/courses/{course_id}/lessons/0"),
        &outsider_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Dashboard lists the single enrollment.
    let response = get_auth(app, "/api/v1/student/dashboard", &student_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["course_id"].as_i64(), Some(course_id));
}
