pub mod admin;
pub mod announcements;
pub mod auth;
pub mod categories;
pub mod courses;
pub mod health;
pub mod student;
pub mod teacher;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/forgot-password                            request reset token (public)
/// /auth/reset-password                             redeem reset token (public)
///
/// /courses                                         public approved catalog (GET)
/// /courses/{id}                                    public course detail (GET)
/// /courses/{id}/enroll                             enroll (student)
/// /courses/{id}/complete-lesson                    mark lesson complete (student)
/// /courses/{id}/ask-question                       ask a question (student)
/// /courses/{id}/review                             upsert review (student, PUT)
///
/// /categories                                      list categories (public)
/// /announcements                                   list platform announcements (public)
///
/// /users/profile                                   get, update own profile
/// /users/change-password                           change password (PUT)
/// /users/profile/image                             upload, delete avatar
///
/// /student/dashboard                               enrolled courses + progress
/// /student/courses/{id}                            course detail projection
/// /student/courses/{id}/lessons/{index}            lesson content (enrollment-gated)
///
/// /teacher/courses                                 list, create own courses
/// /teacher/courses/{id}                            get, update, delete own course
/// /teacher/courses/{id}/submit                     submit draft for approval (POST)
/// /teacher/courses/{id}/students                   roster with progress (GET)
/// /teacher/courses/{id}/announcements              list, create course announcements
/// /teacher/courses/{id}/announcements/{aid}        delete course announcement
/// /teacher/courses/{id}/lessons/{index}/video      upload lesson video (POST)
/// /teacher/questions                               questions across own courses (GET)
/// /teacher/questions/{id}/answer                   answer a question (PUT)
/// /teacher/earnings                                earnings report, 10% fee at read time
///
/// /admin/dashboard                                 aggregate counters (GET)
/// /admin/users                                     list users (GET)
/// /admin/users/{id}/role                           change stored role (PUT)
/// /admin/users/{id}/ban                            ban with reason (PUT)
/// /admin/users/{id}/unban                          lift ban (PUT)
/// /admin/courses                                   list courses by status (GET)
/// /admin/courses/{id}/approve                      approve pending course (PUT)
/// /admin/courses/{id}/reject                       reject pending course (PUT)
/// /admin/teacher-applications                      list pending applicants (GET)
/// /admin/teacher-applications/{id}/approve         approve application (PUT)
/// /admin/teacher-applications/{id}/reject          reject application (PUT)
/// /admin/categories                                create (POST); public list is /categories
/// /admin/categories/{id}                           update, delete
/// /admin/categories/{id}/image                     upload category image (POST)
/// /admin/announcements                             create (POST); public list is /announcements
/// /admin/announcements/{id}                        update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Identity lifecycle (register, login, password reset).
        .nest("/auth", auth::router())
        // Own-profile management.
        .nest("/users", users::router())
        // Public catalog + student course actions.
        .nest("/courses", courses::router())
        // Public reference data.
        .nest("/categories", categories::public_router())
        .nest("/announcements", announcements::public_router())
        // Student dashboard and enrollment-gated content.
        .nest("/student", student::router())
        // Teacher surface: own courses, Q&A, earnings.
        .nest("/teacher", teacher::router())
        // Admin surface: moderation, users, dashboard.
        .nest("/admin", admin::router())
        .nest("/admin/categories", categories::admin_router())
        .nest("/admin/announcements", announcements::admin_router())
}
