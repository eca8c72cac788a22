//! Handlers for the `/student` resource: dashboard and enrollment-gated
//! course content.

use axum::extract::{Path, State};
use axum::Json;
use campus_core::error::CoreError;
use campus_core::progress::progress_percentage;
use campus_core::types::DbId;
use campus_db::repositories::{
    AnnouncementRepo, CourseRepo, DashboardRepo, LessonRepo, ProgressRepo, ReviewRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::courses::LessonOutline;
use crate::middleware::rbac::RequireStudent;
use crate::state::AppState;

/// GET /api/v1/student/dashboard
///
/// The student's enrolled courses joined with their progress records.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
) -> AppResult<Json<serde_json::Value>> {
    let courses = DashboardRepo::student_courses(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": courses })))
}

/// GET /api/v1/student/courses/{id}
///
/// Course detail projection for an enrolled student: course, lesson
/// outline, progress (with completions), own review, and course
/// announcements.
///
/// Reading the detail refreshes the progress record's denormalized
/// totals -- this is the lazy refresh that catches lesson-count changes
/// made since the last touch.
pub async fn course_detail(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    let progress = ProgressRepo::find_by_course_and_student(&state.pool, course_id, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("Not enrolled in this course".into()))
        })?;

    // Lazy refresh of the denormalized totals.
    let total_lessons = LessonRepo::count_by_course(&state.pool, course_id).await?;
    let completed = ProgressRepo::completed_count(&state.pool, progress.id).await?;
    let percentage = progress_percentage(completed, total_lessons);
    let progress =
        ProgressRepo::update_totals(&state.pool, progress.id, total_lessons as i32, percentage)
            .await?;

    let lessons = LessonRepo::list_by_course(&state.pool, course_id).await?;
    let outline: Vec<LessonOutline> = lessons.iter().map(LessonOutline::from).collect();
    let completions = ProgressRepo::completions(&state.pool, progress.id).await?;
    let review =
        ReviewRepo::find_by_course_and_student(&state.pool, course_id, auth.user_id).await?;
    let announcements = AnnouncementRepo::list_by_course(&state.pool, course_id).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "course": course,
            "lessons": outline,
            "progress": progress,
            "completed_lessons": completions,
            "review": review,
            "announcements": announcements,
        }
    })))
}

/// GET /api/v1/student/courses/{id}/lessons/{index}
///
/// Full lesson content (text + video path), gated by enrollment.
pub async fn lesson_content(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path((course_id, index)): Path<(DbId, i32)>,
) -> AppResult<Json<serde_json::Value>> {
    ProgressRepo::find_by_course_and_student(&state.pool, course_id, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("Not enrolled in this course".into()))
        })?;

    let lesson = LessonRepo::find_by_position(&state.pool, course_id, index)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: DbId::from(index),
        }))?;

    Ok(Json(serde_json::json!({ "data": lesson })))
}
