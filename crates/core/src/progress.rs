//! Per-student per-course progress arithmetic.
//!
//! `total_lessons` is a denormalized copy of the course's lesson count,
//! refreshed whenever a completion or a student detail read touches the
//! record. The stored percentage is always `round(100 * completed / total)`
//! against the total that was current at the last touch; a bulk lesson-count
//! update leaves the percentage stale until then.

use crate::error::CoreError;

/// `round(100 * completed / total)`, or 0 for a course with no lessons.
pub fn progress_percentage(completed: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as i32
}

/// A completion must target an existing lesson: `0 <= index < total`.
///
/// Without this check an out-of-range index would count toward the
/// percentage and push it past 100.
pub fn validate_lesson_index(index: i32, total: i64) -> Result<(), CoreError> {
    if index < 0 || i64::from(index) >= total {
        return Err(CoreError::Validation(format!(
            "Lesson index {index} is out of range for a course with {total} lessons"
        )));
    }
    Ok(())
}
