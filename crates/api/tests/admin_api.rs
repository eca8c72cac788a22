//! HTTP-level integration tests for the admin surface: RBAC enforcement,
//! dashboard aggregates, user moderation (ban takes effect on live
//! tokens), and the teacher-application workflow.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, put_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

/// Students and teachers are locked out of `/admin`; anonymous requests
/// are 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_rbac(pool: PgPool) {
    let student = common::create_user(&pool, "alice", "student").await;
    let teacher = common::create_user(&pool, "teach", "teacher").await;
    let app = common::build_test_app(pool);

    let student_token = common::login(app.clone(), &student.email).await;
    let teacher_token = common::login(app.clone(), &teacher.email).await;

    let response = get_auth(app.clone(), "/api/v1/admin/dashboard", &student_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), "/api/v1/admin/dashboard", &teacher_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = common::get(app, "/api/v1/admin/dashboard").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard counters reflect seeded users, courses, enrollments and
/// completed revenue.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_dashboard_counts(pool: PgPool) {
    let teacher = common::create_user(&pool, "teach", "teacher").await;
    let admin = common::create_user(&pool, "root", "admin").await;
    let student = common::create_user(&pool, "alice", "student").await;
    common::create_user(&pool, "applicant", "pending_teacher").await;
    let course = common::create_course_with_lessons(&pool, teacher.id, 29900, 3).await;
    common::approve_course(&pool, course.id, admin.id).await;

    let app = common::build_test_app(pool);
    let student_token = common::login(app.clone(), &student.email).await;
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{}/enroll", course.id),
        &student_token,
        serde_json::json!({ "payment_method": "credit_card" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let admin_token = common::login(app.clone(), &admin.email).await;
    let response = get_auth(app, "/api/v1/admin/dashboard", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_students"], 1);
    assert_eq!(json["data"]["total_teachers"], 1);
    assert_eq!(json["data"]["pending_teacher_applications"], 1);
    assert_eq!(json["data"]["total_courses"], 1);
    assert_eq!(json["data"]["approved_courses"], 1);
    assert_eq!(json["data"]["total_enrollments"], 1);
    assert_eq!(json["data"]["total_revenue_cents"], 29900);
}

// ---------------------------------------------------------------------------
// User moderation
// ---------------------------------------------------------------------------

/// Banning takes effect on live tokens immediately; unbanning restores
/// access.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ban_hits_live_tokens(pool: PgPool) {
    let admin = common::create_user(&pool, "root", "admin").await;
    let student = common::create_user(&pool, "troll", "student").await;
    let app = common::build_test_app(pool);

    let admin_token = common::login(app.clone(), &admin.email).await;
    let student_token = common::login(app.clone(), &student.email).await;

    // Works before the ban.
    let response = get_auth(app.clone(), "/api/v1/users/profile", &student_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Ban requires a reason.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/ban", student.id),
        &admin_token,
        serde_json::json!({ "reason": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/ban", student.id),
        &admin_token,
        serde_json::json!({ "reason": "abusive reviews" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The live token stops working and login is refused.
    let response = get_auth(app.clone(), "/api/v1/users/profile", &student_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": student.email, "password": common::TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Unban restores access.
    let response = put_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/unban", student.id),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(app, "/api/v1/users/profile", &student_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Admins cannot ban their own account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_cannot_self_ban(pool: PgPool) {
    let admin = common::create_user(&pool, "root", "admin").await;
    let app = common::build_test_app(pool);
    let admin_token = common::login(app.clone(), &admin.email).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/ban", admin.id),
        &admin_token,
        serde_json::json!({ "reason": "oops" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Role changes apply to the stored role; `pending_teacher` cannot be
/// assigned directly.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_user_role(pool: PgPool) {
    let admin = common::create_user(&pool, "root", "admin").await;
    let student = common::create_user(&pool, "alice", "student").await;
    let app = common::build_test_app(pool);
    let admin_token = common::login(app.clone(), &admin.email).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}/role", student.id),
        &admin_token,
        serde_json::json!({ "role": "teacher" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "teacher");

    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/role", student.id),
        &admin_token,
        serde_json::json!({ "role": "pending_teacher" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Teacher applications
// ---------------------------------------------------------------------------

/// Approval promotes the stored role, but the applicant's pre-approval
/// token keeps its student capabilities -- elevated claims require a
/// fresh login.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_application_approval_requires_reauth(pool: PgPool) {
    let admin = common::create_user(&pool, "root", "admin").await;
    let app = common::build_test_app(pool);
    let admin_token = common::login(app.clone(), &admin.email).await;

    // Applicant registers via the API.
    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        serde_json::json!({
            "name": "Bob",
            "email": "bob@test.com",
            "password": common::TEST_PASSWORD,
            "role": "teacher",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let applicant_id = json["user"]["id"].as_i64().unwrap();
    let old_token = json["access_token"].as_str().unwrap().to_string();

    // Listed as a pending application.
    let response = get_auth(app.clone(), "/api/v1/admin/teacher-applications", &admin_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Approve.
    let response = put_auth(
        app.clone(),
        &format!("/api/v1/admin/teacher-applications/{applicant_id}/approve"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "teacher");
    assert_eq!(json["application_status"], "approved");

    // The pre-approval token is still effectively a student.
    let response = get_auth(app.clone(), "/api/v1/teacher/courses", &old_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A fresh login carries teacher claims.
    let new_token = common::login(app.clone(), "bob@test.com").await;
    let response = get_auth(app, "/api/v1/teacher/courses", &new_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Rejection reverts the role to student and records the reason; a second
/// review of the same user conflicts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_application_rejection(pool: PgPool) {
    let admin = common::create_user(&pool, "root", "admin").await;
    let applicant = common::create_user(&pool, "bob", "pending_teacher").await;
    let app = common::build_test_app(pool);
    let admin_token = common::login(app.clone(), &admin.email).await;
    let uri = format!("/api/v1/admin/teacher-applications/{}/reject", applicant.id);

    // Reason is mandatory.
    let response =
        put_json_auth(app.clone(), &uri, &admin_token, serde_json::json!({ "reason": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app.clone(),
        &uri,
        &admin_token,
        serde_json::json!({ "reason": "no teaching experience" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "student");
    assert_eq!(json["application_status"], "rejected");

    // Already resolved: reviewing again conflicts.
    let response = put_json_auth(
        app,
        &uri,
        &admin_token,
        serde_json::json!({ "reason": "again" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Reviewing a user who never applied is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_non_applicant_fails(pool: PgPool) {
    let admin = common::create_user(&pool, "root", "admin").await;
    let student = common::create_user(&pool, "alice", "student").await;
    let app = common::build_test_app(pool);
    let admin_token = common::login(app.clone(), &admin.email).await;

    let response = put_auth(
        app,
        &format!("/api/v1/admin/teacher-applications/{}/approve", student.id),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
