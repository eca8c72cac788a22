//! Teacher-application workflow.
//!
//! Registering with the teacher role parks the account in the
//! `pending_teacher` role with a `pending` application. An admin resolves
//! the application: approval promotes the stored role to `teacher`,
//! rejection reverts it to `student`. Either way the decision is recorded
//! on the user row; the live token is deliberately not upgraded -- the user
//! must re-authenticate to pick up elevated claims.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;

/// Review state of a teacher application, persisted in
/// `users.application_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown application status '{other}'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// An application may be reviewed only while the user is still a pending
/// teacher. Reviewing a resolved application or a non-applicant is a
/// conflict.
pub fn validate_reviewable(role: Role) -> Result<(), CoreError> {
    match role {
        Role::PendingTeacher => Ok(()),
        other => Err(CoreError::Conflict(format!(
            "User is not a pending teacher applicant (current role: {})",
            other.as_str()
        ))),
    }
}

/// The stored role an application decision resolves to.
pub fn resolved_role(approve: bool) -> Role {
    if approve {
        Role::Teacher
    } else {
        Role::Student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_only_pending_teacher_is_reviewable() {
        assert!(validate_reviewable(Role::PendingTeacher).is_ok());
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            let err = validate_reviewable(role).unwrap_err();
            assert!(err.to_string().contains("not a pending teacher"));
        }
    }

    #[test]
    fn test_approval_promotes_rejection_reverts() {
        assert_eq!(resolved_role(true), Role::Teacher);
        assert_eq!(resolved_role(false), Role::Student);
    }
}
