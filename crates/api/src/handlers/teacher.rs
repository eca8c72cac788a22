//! Handlers for the `/teacher` resource: own-course lifecycle, roster and
//! Q&A, course announcements, lesson video upload, and the earnings report.
//!
//! All handlers require the teacher (or admin) effective role via
//! [`RequireTeacher`]; course ownership is checked per handler.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::course::{self, CourseLevel, CourseStatus, EditableField};
use campus_core::earnings::{split_earnings, PLATFORM_FEE_PERCENT};
use campus_core::error::CoreError;
use campus_core::roles::ROLE_ADMIN;
use campus_core::types::DbId;
use campus_core::uploads::validate_video_upload;
use campus_db::models::announcement::CreateCourseAnnouncement;
use campus_db::models::course::{Course, CreateCourse, UpdateCourse};
use campus_db::models::lesson::LessonInput;
use campus_db::repositories::{
    AnnouncementRepo, CourseRepo, DashboardRepo, EnrollmentRepo, LessonRepo, QuestionRepo,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::{read_file_field, store_file};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireTeacher;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /teacher/courses`.
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Option<DbId>,
    pub level: Option<String>,
    #[serde(default)]
    pub duration_hours: i32,
    #[serde(default)]
    pub price_cents: i64,
    /// Optional initial lesson list.
    pub lessons: Option<Vec<LessonInput>>,
}

/// Request body for `PUT /teacher/courses/{id}`.
///
/// On approved courses only `description` and `lessons` are applied; the
/// rest is silently dropped (allow-list filtering, not an error).
#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub level: Option<String>,
    pub duration_hours: Option<i32>,
    pub price_cents: Option<i64>,
    pub lessons: Option<Vec<LessonInput>>,
}

/// Query parameters for `GET /teacher/questions`.
#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    /// If `true`, return only unanswered questions. Defaults to `false`.
    pub unanswered_only: Option<bool>,
}

/// Request body for `PUT /teacher/questions/{id}/answer`.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub content: String,
}

/// Request body for `POST /teacher/courses/{id}/announcements`.
#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    pub title: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Course CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/teacher/courses
pub async fn list_courses(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
) -> AppResult<Json<serde_json::Value>> {
    let courses = CourseRepo::list_by_instructor(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": courses })))
}

/// POST /api/v1/teacher/courses
///
/// Create a course in `draft` status, optionally with an initial lesson
/// list.
pub async fn create_course(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Json(input): Json<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Course title must not be empty".into(),
        )));
    }
    if input.price_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Course price must not be negative".into(),
        )));
    }
    let level = match &input.level {
        Some(level) => CourseLevel::parse(level)?,
        None => CourseLevel::Beginner,
    };

    let course = CourseRepo::create(
        &state.pool,
        &CreateCourse {
            title: input.title.trim().to_string(),
            description: input.description,
            category_id: input.category_id,
            level: level.as_str().to_string(),
            duration_hours: input.duration_hours,
            price_cents: input.price_cents,
            instructor_id: auth.user_id,
        },
    )
    .await?;

    if let Some(lessons) = &input.lessons {
        CourseRepo::replace_lessons(&state.pool, course.id, lessons).await?;
    }
    let lessons = LessonRepo::list_by_course(&state.pool, course.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": { "course": course, "lessons": lessons } })),
    ))
}

/// GET /api/v1/teacher/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let course = load_owned_course(&state, &auth, id).await?;
    let lessons = LessonRepo::list_by_course(&state.pool, id).await?;
    Ok(Json(
        serde_json::json!({ "data": { "course": course, "lessons": lessons } }),
    ))
}

/// PUT /api/v1/teacher/courses/{id}
///
/// Partial update. Once a course is approved, only `description` and
/// `lessons` pass the allow-list; any other provided field is dropped
/// without an error. A lesson-list change propagates the new count to all
/// progress records (percentages refresh lazily).
pub async fn update_course(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourseRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let course = load_owned_course(&state, &auth, id).await?;
    let status = CourseStatus::parse(&course.status)?;

    if let Some(level) = &input.level {
        CourseLevel::parse(level)?;
    }
    if matches!(input.price_cents, Some(p) if p < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Course price must not be negative".into(),
        )));
    }

    // Allow-list filter: fields not editable in the current status are
    // dropped, not rejected.
    let update = UpdateCourse {
        title: input
            .title
            .filter(|_| course::field_editable(status, EditableField::Title)),
        description: input
            .description
            .filter(|_| course::field_editable(status, EditableField::Description)),
        category_id: input
            .category_id
            .filter(|_| course::field_editable(status, EditableField::Category)),
        level: input
            .level
            .filter(|_| course::field_editable(status, EditableField::Level)),
        duration_hours: input
            .duration_hours
            .filter(|_| course::field_editable(status, EditableField::Duration)),
        price_cents: input
            .price_cents
            .filter(|_| course::field_editable(status, EditableField::Price)),
    };

    let course = CourseRepo::update_fields(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    if let Some(lessons) = &input.lessons {
        if course::field_editable(status, EditableField::Lessons) {
            CourseRepo::replace_lessons(&state.pool, id, lessons).await?;
        }
    }
    let lessons = LessonRepo::list_by_course(&state.pool, id).await?;

    Ok(Json(
        serde_json::json!({ "data": { "course": course, "lessons": lessons } }),
    ))
}

/// DELETE /api/v1/teacher/courses/{id}
///
/// Delete an owned course. Enrollments, progress, questions, reviews and
/// announcements cascade; payment log entries survive with a nulled
/// course reference.
pub async fn delete_course(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned_course(&state, &auth, id).await?;
    CourseRepo::delete(&state.pool, id).await?;
    tracing::info!(course_id = id, instructor_id = auth.user_id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/teacher/courses/{id}/submit
///
/// Submit a draft for admin review. Legal only from `draft`.
pub async fn submit_course(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let course = load_owned_course(&state, &auth, id).await?;
    course::validate_submit_transition(CourseStatus::parse(&course.status)?)?;

    let course = CourseRepo::submit(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Course is no longer in draft status".into(),
        ))
    })?;

    Ok(Json(serde_json::json!({ "data": course })))
}

// ---------------------------------------------------------------------------
// Roster & Q&A
// ---------------------------------------------------------------------------

/// GET /api/v1/teacher/courses/{id}/students
///
/// The course roster joined with each student's progress.
pub async fn list_students(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    load_owned_course(&state, &auth, id).await?;
    let students = EnrollmentRepo::list_students_with_progress(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "data": students })))
}

/// GET /api/v1/teacher/questions
///
/// Questions across all of the teacher's courses, oldest first.
pub async fn list_questions(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Query(params): Query<QuestionQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let questions = QuestionRepo::list_for_instructor(
        &state.pool,
        auth.user_id,
        params.unanswered_only.unwrap_or(false),
    )
    .await?;
    Ok(Json(serde_json::json!({ "data": questions })))
}

/// PUT /api/v1/teacher/questions/{id}/answer
///
/// Answer a question on an owned course. Answering is one-way: an already
/// answered question is a 409.
pub async fn answer_question(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
    Json(input): Json<AnswerRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Answer content must not be empty".into(),
        )));
    }

    let question = QuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id,
        }))?;
    load_owned_course(&state, &auth, question.course_id).await?;

    if question.is_answered {
        return Err(AppError::Core(CoreError::Conflict(
            "Question is already answered".into(),
        )));
    }

    let question = QuestionRepo::answer(&state.pool, id, input.content.trim(), auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Question is already answered".into()))
        })?;

    Ok(Json(serde_json::json!({ "data": question })))
}

// ---------------------------------------------------------------------------
// Course announcements
// ---------------------------------------------------------------------------

/// GET /api/v1/teacher/courses/{id}/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    load_owned_course(&state, &auth, id).await?;
    let announcements = AnnouncementRepo::list_by_course(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "data": announcements })))
}

/// POST /api/v1/teacher/courses/{id}/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path(id): Path<DbId>,
    Json(input): Json<AnnouncementRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    load_owned_course(&state, &auth, id).await?;

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Announcement title must not be empty".into(),
        )));
    }

    let announcement = AnnouncementRepo::create_for_course(
        &state.pool,
        &CreateCourseAnnouncement {
            course_id: id,
            title: input.title.trim().to_string(),
            content: input.content,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": announcement })),
    ))
}

/// DELETE /api/v1/teacher/courses/{id}/announcements/{aid}
pub async fn delete_announcement(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path((id, aid)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    load_owned_course(&state, &auth, id).await?;
    let deleted = AnnouncementRepo::delete_for_course(&state.pool, id, aid).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id: aid,
        }))
    }
}

// ---------------------------------------------------------------------------
// Video upload & earnings
// ---------------------------------------------------------------------------

/// POST /api/v1/teacher/courses/{id}/lessons/{index}/video
///
/// Multipart upload with a required `video` field. The file is stored on
/// local disk and the lesson's video path updated.
pub async fn upload_lesson_video(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
    Path((id, index)): Path<(DbId, i32)>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    load_owned_course(&state, &auth, id).await?;
    LessonRepo::find_by_position(&state.pool, id, index)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: DbId::from(index),
        }))?;

    let file = read_file_field(&mut multipart, "video").await?;
    validate_video_upload(&file.filename, file.data.len())?;

    let ext = file
        .filename
        .rsplit('.')
        .next()
        .unwrap_or("mp4")
        .to_lowercase();
    let filename = format!("course_{id}_lesson_{index}_{}.{ext}", Uuid::new_v4());
    let video_path = store_file(&state.config.upload_dir, "videos", &filename, &file.data).await?;

    LessonRepo::set_video_path(&state.pool, id, index, &video_path).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": { "video_path": video_path } })),
    ))
}

/// GET /api/v1/teacher/earnings
///
/// Earnings report over completed payments. The flat 10% platform fee is
/// applied here at read time and never persisted.
pub async fn earnings(
    State(state): State<AppState>,
    RequireTeacher(auth): RequireTeacher,
) -> AppResult<Json<serde_json::Value>> {
    let rows = DashboardRepo::instructor_earnings(&state.pool, auth.user_id).await?;

    let courses: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let split = split_earnings(row.gross_cents);
            serde_json::json!({
                "course_id": row.course_id,
                "title": row.title,
                "sales": row.sales,
                "gross_cents": split.gross_cents,
                "fee_cents": split.fee_cents,
                "net_cents": split.net_cents,
            })
        })
        .collect();

    let total = split_earnings(rows.iter().map(|r| r.gross_cents).sum());

    Ok(Json(serde_json::json!({
        "data": {
            "platform_fee_percent": PLATFORM_FEE_PERCENT,
            "courses": courses,
            "total": total,
        }
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a course and verify the caller owns it (admins bypass ownership).
async fn load_owned_course(
    state: &AppState,
    auth: &AuthUser,
    course_id: DbId,
) -> AppResult<Course> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    if course.instructor_id != auth.user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this course".into(),
        )));
    }
    Ok(course)
}
