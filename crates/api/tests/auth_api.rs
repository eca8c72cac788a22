//! HTTP-level integration tests for the auth endpoints: registration,
//! login, the effective-role mapping, and the password-reset flow.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

use campus_api::auth::jwt::generate_reset_token;
use campus_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Student registration returns 201 with a token and the stored role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_student(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Alice",
        "email": "alice@test.com",
        "password": "long-enough-password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["role"], "student");
    assert_eq!(json["user"]["email"], "alice@test.com");
}

/// Teacher registration parks the account as a pending applicant: stored
/// role `pending_teacher`, application `pending`, and a token that only
/// grants student capabilities.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_teacher_becomes_pending_applicant(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Bob",
        "email": "bob@test.com",
        "password": "long-enough-password",
        "role": "teacher",
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "pending_teacher");
    assert_eq!(json["user"]["application_status"], "pending");

    // The token's effective role is student: the teacher surface is closed.
    let token = json["access_token"].as_str().unwrap();
    let response = get_auth(app, "/api/v1/teacher/courses", token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Registering with an admin role is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_admin_role_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Eve",
        "email": "eve@test.com",
        "password": "long-enough-password",
        "role": "admin",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A duplicate email surfaces as 409 via the unique index.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Alice",
        "email": "alice@test.com",
        "password": "long-enough-password",
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A too-short password is a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Alice",
        "email": "alice@test.com",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a usable token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = common::create_user(&pool, "alice", "student").await;
    let app = common::build_test_app(pool);

    let token = common::login(app.clone(), &user.email).await;

    let response = get_auth(app, "/api/v1/users/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "alice@test.com");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let user = common::create_user(&pool, "alice", "student").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": user.email, "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent email returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A banned account is refused at login with 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_banned_user(pool: PgPool) {
    let user = common::create_user(&pool, "troll", "student").await;
    UserRepo::ban(&pool, user.id, "spamming the forums")
        .await
        .expect("ban should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": user.email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("spamming"),
        "ban reason should be surfaced"
    );
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// Forgot-password answers 200 even for unknown emails (no enumeration).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_forgot_password_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "nobody@test.com" });
    let response = post_json(app, "/api/v1/auth/forgot-password", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A stored reset token can be redeemed once; the new password works and
/// the token is spent.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reset_password_single_use(pool: PgPool) {
    let user = common::create_user(&pool, "alice", "student").await;
    let (token, token_hash) = generate_reset_token();
    UserRepo::set_reset_token(&pool, user.id, &token_hash, Utc::now() + Duration::minutes(60))
        .await
        .expect("storing token should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "token": token, "new_password": "brand-new-password" });
    let response = post_json(app.clone(), "/api/v1/auth/reset-password", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The new password logs in.
    let login_body = serde_json::json!({ "email": user.email, "password": "brand-new-password" });
    let response = post_json(app.clone(), "/api/v1/auth/login", login_body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The token is single-use.
    let response = post_json(app, "/api/v1/auth/reset-password", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An expired reset token is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reset_password_expired_token(pool: PgPool) {
    let user = common::create_user(&pool, "alice", "student").await;
    let (token, token_hash) = generate_reset_token();
    UserRepo::set_reset_token(&pool, user.id, &token_hash, Utc::now() - Duration::minutes(5))
        .await
        .expect("storing token should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "token": token, "new_password": "brand-new-password" });
    let response = post_json(app, "/api/v1/auth/reset-password", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
