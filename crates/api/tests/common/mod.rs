//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full production router (same middleware stack as `main.rs`)
//! against the per-test database provided by `#[sqlx::test]`, plus request
//! and seeding helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use campus_api::auth::jwt::JwtConfig;
use campus_api::auth::password::hash_password;
use campus_api::config::ServerConfig;
use campus_api::router::build_app_router;
use campus_api::state::AppState;
use campus_core::types::DbId;
use campus_db::models::course::{Course, CreateCourse};
use campus_db::models::lesson::LessonInput;
use campus_db::models::user::{CreateUser, User};
use campus_db::repositories::{CourseRepo, UserRepo};

/// Password used for every seeded test user.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: "storage/test-uploads".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. No mailer: password-reset emails are skipped.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "PUT", uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database with [`TEST_PASSWORD`] and the
/// given stored role. The email is derived from the name.
pub async fn create_user(pool: &PgPool, name: &str, role: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let application_status = (role == "pending_teacher").then(|| "pending".to_string());
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{name}@test.com"),
        password_hash: hashed,
        role: role.to_string(),
        application_status,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in a seeded user via the API and return their access token.
pub async fn login(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("response must contain access_token")
        .to_string()
}

/// Create a draft course with the given lesson count directly in the
/// database.
pub async fn create_course_with_lessons(
    pool: &PgPool,
    instructor_id: DbId,
    price_cents: i64,
    lesson_count: usize,
) -> Course {
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            title: "Practical Woodworking".to_string(),
            description: "From saw to finish".to_string(),
            category_id: None,
            level: "beginner".to_string(),
            duration_hours: 12,
            price_cents,
            instructor_id,
        },
    )
    .await
    .expect("course creation should succeed");

    let lessons: Vec<LessonInput> = (0..lesson_count)
        .map(|i| LessonInput {
            title: format!("Lesson {i}"),
            content: format!("Lesson {i} content"),
            video_path: None,
            duration_minutes: 15,
        })
        .collect();
    CourseRepo::replace_lessons(pool, course.id, &lessons)
        .await
        .expect("lesson creation should succeed");

    course
}

/// Walk a draft course through submit + approve so it becomes enrollable.
pub async fn approve_course(pool: &PgPool, course_id: DbId, admin_id: DbId) {
    CourseRepo::submit(pool, course_id)
        .await
        .expect("submit should succeed")
        .expect("course should be in draft");
    CourseRepo::approve(pool, course_id, admin_id)
        .await
        .expect("approve should succeed")
        .expect("course should be pending");
}
