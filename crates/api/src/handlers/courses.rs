//! Handlers for the `/courses` resource: public catalog plus the student
//! course actions (enroll, complete lesson, ask question, review).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::course::{self, CourseStatus};
use campus_core::enrollment::{self, PaymentMethod};
use campus_core::error::CoreError;
use campus_core::progress::{progress_percentage, validate_lesson_index};
use campus_core::review::validate_rating;
use campus_core::types::DbId;
use campus_db::models::course::CourseFilter;
use campus_db::models::enrollment::EnrollCourse;
use campus_db::models::lesson::Lesson;
use campus_db::models::payment::NewPayment;
use campus_db::models::question::CreateQuestion;
use campus_db::models::review::UpsertReview;
use campus_db::repositories::{
    CourseRepo, EnrollmentRepo, LessonRepo, ProgressRepo, QuestionRepo, ReviewRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStudent;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /courses`.
#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    pub category_id: Option<DbId>,
    pub level: Option<String>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
}

/// Request body for `POST /courses/{id}/enroll`.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Required for priced courses: `"credit_card"` or `"bank_transfer"`.
    pub payment_method: Option<String>,
    /// Opaque method-specific payload, stored verbatim on the payment.
    pub payment_details: Option<serde_json::Value>,
}

/// Request body for `POST /courses/{id}/complete-lesson`.
#[derive(Debug, Deserialize)]
pub struct CompleteLessonRequest {
    pub lesson_index: i32,
}

/// Request body for `POST /courses/{id}/ask-question`.
#[derive(Debug, Deserialize)]
pub struct AskQuestionRequest {
    pub lesson_index: i32,
    pub title: String,
    pub content: String,
}

/// Request body for `PUT /courses/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// Public lesson projection: outline only, no content or video. Full
/// lesson content is enrollment-gated under `/student`.
#[derive(Debug, Serialize)]
pub struct LessonOutline {
    pub position: i32,
    pub title: String,
    pub duration_minutes: i32,
}

impl From<&Lesson> for LessonOutline {
    fn from(lesson: &Lesson) -> Self {
        Self {
            position: lesson.position,
            title: lesson.title.clone(),
            duration_minutes: lesson.duration_minutes,
        }
    }
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
///
/// List approved courses with optional category/level/search filters.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let filter = CourseFilter {
        category_id: params.category_id,
        level: params.level,
        search: params.search,
    };
    let courses = CourseRepo::list_approved(&state.pool, &filter).await?;
    Ok(Json(serde_json::json!({ "data": courses })))
}

/// GET /api/v1/courses/{id}
///
/// Public course detail. Only approved courses are visible here;
/// everything else 404s so drafts and rejected courses stay hidden.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.status == CourseStatus::Approved.as_str())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let lessons = LessonRepo::list_by_course(&state.pool, id).await?;
    let outline: Vec<LessonOutline> = lessons.iter().map(LessonOutline::from).collect();
    let enrolled_students = EnrollmentRepo::count_by_course(&state.pool, id).await?;
    let average_rating = ReviewRepo::average_rating(&state.pool, id).await?;
    let reviews = ReviewRepo::list_by_course(&state.pool, id).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "course": course,
            "lessons": outline,
            "enrolled_students": enrolled_students,
            "average_rating": average_rating,
            "reviews": reviews,
        }
    })))
}

// ---------------------------------------------------------------------------
// Enrollment
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/enroll
///
/// Enroll the authenticated student. For priced courses a payment record
/// is created with a status derived from the method (bank transfers start
/// pending but the student is enrolled immediately either way). Payment,
/// enrollment and progress writes share one transaction.
pub async fn enroll(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(course_id): Path<DbId>,
    Json(input): Json<EnrollRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    // 1. Course must exist and be approved.
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    course::validate_enrollable(CourseStatus::parse(&course.status)?)?;

    // 2. Friendly duplicate check; the unique index is the backstop for
    //    the concurrent case (surfaces as 409).
    if EnrollmentRepo::exists(&state.pool, course_id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::Validation(
            "Already enrolled in this course".into(),
        )));
    }

    // 3. Derive the payment for priced courses.
    let method = if course.price_cents > 0 {
        let method_str = input.payment_method.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "payment_method is required for a priced course".into(),
            ))
        })?;
        let method = PaymentMethod::parse(method_str)?;
        enrollment::validate_paid_method(method)?;
        method
    } else {
        PaymentMethod::Free
    };

    let payment = (course.price_cents > 0).then(|| NewPayment {
        user_id: auth.user_id,
        course_id,
        amount_cents: course.price_cents,
        method: method.as_str().to_string(),
        status: enrollment::initial_payment_status(method).as_str().to_string(),
        details: input
            .payment_details
            .clone()
            .unwrap_or_else(|| serde_json::json!({})),
        transaction_id: enrollment::generate_transaction_id(),
    });

    // 4. Transactional write: payment + enrollment + zeroed progress.
    let total_lessons = LessonRepo::count_by_course(&state.pool, course_id).await?;
    let enroll_input = EnrollCourse {
        course_id,
        student_id: auth.user_id,
        total_lessons,
        payment,
    };
    let (enrollment_row, payment_row) = EnrollmentRepo::enroll(&state.pool, &enroll_input).await?;

    let outcome = enrollment::enrollment_outcome(course.price_cents, method);
    tracing::info!(
        student_id = auth.user_id,
        course_id,
        outcome = outcome.as_str(),
        "Student enrolled"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "data": {
                "enrollment_status": outcome.as_str(),
                "enrollment": enrollment_row,
                "payment": payment_row,
            }
        })),
    ))
}

// ---------------------------------------------------------------------------
// Lesson completion
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/complete-lesson
///
/// Mark a lesson complete. Refreshes the denormalized lesson count first
/// (lessons may have been added or removed since enrollment), rejects
/// out-of-range indices, and is idempotent: completing the same index
/// again is a no-op that still succeeds with a distinguishing message.
pub async fn complete_lesson(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(course_id): Path<DbId>,
    Json(input): Json<CompleteLessonRequest>,
) -> AppResult<Json<serde_json::Value>> {
    // 1. Course and enrollment must exist.
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    let progress = ProgressRepo::find_by_course_and_student(&state.pool, course_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: course_id,
        }))?;

    // 2. Refresh the total from the course's current lesson count.
    let total_lessons = LessonRepo::count_by_course(&state.pool, course_id).await?;

    // 3. Bounds check against the refreshed total.
    validate_lesson_index(input.lesson_index, total_lessons)?;

    // 4. Record the completion unless it already exists.
    let already_completed =
        ProgressRepo::is_completed(&state.pool, progress.id, input.lesson_index).await?;
    if !already_completed {
        ProgressRepo::add_completion(&state.pool, progress.id, input.lesson_index).await?;
    }

    // 5. Recompute the stored percentage and touch last_accessed_at.
    let completed = ProgressRepo::completed_count(&state.pool, progress.id).await?;
    let percentage = progress_percentage(completed, total_lessons);
    let updated =
        ProgressRepo::update_totals(&state.pool, progress.id, total_lessons as i32, percentage)
            .await?;

    let message = if already_completed {
        "Lesson was already completed"
    } else {
        "Lesson marked as completed"
    };

    Ok(Json(serde_json::json!({
        "data": {
            "message": message,
            "already_completed": already_completed,
            "progress": updated,
        }
    })))
}

// ---------------------------------------------------------------------------
// Q&A and reviews
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/ask-question
///
/// Ask a question against a lesson. Requires enrollment.
pub async fn ask_question(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(course_id): Path<DbId>,
    Json(input): Json<AskQuestionRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    if !EnrollmentRepo::exists(&state.pool, course_id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Must be enrolled in the course to ask questions".into(),
        )));
    }

    if input.title.trim().is_empty() || input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Question title and content must not be empty".into(),
        )));
    }

    let question = QuestionRepo::create(
        &state.pool,
        &CreateQuestion {
            course_id,
            lesson_index: input.lesson_index,
            student_id: auth.user_id,
            title: input.title.trim().to_string(),
            content: input.content.trim().to_string(),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": question })),
    ))
}

/// PUT /api/v1/courses/{id}/review
///
/// Upsert the student's review of a course. Requires enrollment, nothing
/// more -- a student may review before completing a single lesson. A
/// repeat submission overwrites the previous rating and comment.
pub async fn upsert_review(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Path(course_id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_rating(input.rating)?;

    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    if !EnrollmentRepo::exists(&state.pool, course_id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Must be enrolled in the course to review it".into(),
        )));
    }

    let review = ReviewRepo::upsert(
        &state.pool,
        &UpsertReview {
            course_id,
            student_id: auth.user_id,
            rating: input.rating,
            comment: input.comment.trim().to_string(),
        },
    )
    .await?;

    Ok(Json(serde_json::json!({ "data": review })))
}
