//! Course lifecycle state machine and catalog enums.
//!
//! The only legal status path is `draft -> pending -> {approved, rejected}`.
//! A rejected course re-enters review by being edited and resubmitted from
//! scratch by its owner; there is no direct rejected -> pending transition.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Course moderation status, as persisted in `courses.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl CourseStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown course status '{other}'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(CoreError::Validation(format!(
                "Unknown course level '{other}'. Must be one of: beginner, intermediate, advanced"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// A teacher may submit a course for review only from `draft`.
pub fn validate_submit_transition(current: CourseStatus) -> Result<(), CoreError> {
    match current {
        CourseStatus::Draft => Ok(()),
        other => Err(CoreError::Conflict(format!(
            "Only draft courses can be submitted for approval (current status: {})",
            other.as_str()
        ))),
    }
}

/// An admin may approve or reject a course only while it is `pending`.
pub fn validate_review_transition(current: CourseStatus) -> Result<(), CoreError> {
    match current {
        CourseStatus::Pending => Ok(()),
        other => Err(CoreError::Conflict(format!(
            "Only pending courses can be reviewed (current status: {})",
            other.as_str()
        ))),
    }
}

/// Only approved courses are publicly listable or enrollable.
pub fn validate_enrollable(current: CourseStatus) -> Result<(), CoreError> {
    match current {
        CourseStatus::Approved => Ok(()),
        _ => Err(CoreError::Validation(
            "Course is not yet approved for enrollment".into(),
        )),
    }
}

/// Whether a teacher edit may touch the given field on a course in `current`
/// status.
///
/// Once a course is approved, only `description` and `lessons` remain
/// editable; every other field in an update is silently dropped by the
/// handler (allow-list filtering, not an error).
pub fn field_editable(current: CourseStatus, field: EditableField) -> bool {
    match current {
        CourseStatus::Approved => matches!(
            field,
            EditableField::Description | EditableField::Lessons
        ),
        _ => true,
    }
}

/// Fields a teacher update may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Title,
    Description,
    Category,
    Level,
    Duration,
    Price,
    Lessons,
}
