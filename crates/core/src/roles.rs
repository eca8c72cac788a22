//! Role model and effective-capability mapping.
//!
//! The stored role is a tagged union rather than a bare string so the
//! `pending_teacher` sub-state (an applicant who still has student rights)
//! is explicit. Tokens never carry the stored role directly; they carry the
//! [`EffectiveRole`] derived from it, so a pending applicant authenticates
//! as a student until an admin approves the application and the user logs
//! in again.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Well-known role names as persisted in the `users.role` column.
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PENDING_TEACHER: &str = "pending_teacher";

/// A user's stored role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    /// A teacher applicant awaiting admin review. Holds student rights
    /// until the application is resolved.
    PendingTeacher,
}

impl Role {
    /// Parse a stored role string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_STUDENT => Ok(Self::Student),
            ROLE_TEACHER => Ok(Self::Teacher),
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_PENDING_TEACHER => Ok(Self::PendingTeacher),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }

    /// The persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Teacher => ROLE_TEACHER,
            Self::Admin => ROLE_ADMIN,
            Self::PendingTeacher => ROLE_PENDING_TEACHER,
        }
    }

    /// The capability level this role grants in an auth token.
    pub fn effective(self) -> EffectiveRole {
        match self {
            Self::Student | Self::PendingTeacher => EffectiveRole::Student,
            Self::Teacher => EffectiveRole::Teacher,
            Self::Admin => EffectiveRole::Admin,
        }
    }
}

/// The capability level encoded in an auth token.
///
/// Distinct from [`Role`]: `pending_teacher` is a stored role but never an
/// effective one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveRole {
    Student,
    Teacher,
    Admin,
}

impl EffectiveRole {
    /// The string form carried in JWT claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Teacher => ROLE_TEACHER,
            Self::Admin => ROLE_ADMIN,
        }
    }
}

/// Roles a self-service registration may request.
///
/// `admin` accounts are provisioned out-of-band; `pending_teacher` is
/// assigned by the system, never requested directly.
pub fn validate_registration_role(role: Role) -> Result<(), CoreError> {
    match role {
        Role::Student | Role::Teacher => Ok(()),
        other => Err(CoreError::Validation(format!(
            "Cannot register with role '{}'",
            other.as_str()
        ))),
    }
}

/// Roles an admin may assign directly to a user.
///
/// `pending_teacher` is excluded: that state exists only as the result of a
/// teacher registration and is resolved through the application workflow.
pub fn validate_assignable_role(role: Role) -> Result<(), CoreError> {
    match role {
        Role::Student | Role::Teacher | Role::Admin => Ok(()),
        Role::PendingTeacher => Err(CoreError::Validation(
            "Role 'pending_teacher' can only be entered via a teacher application".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_all_roles() {
        for role in [
            Role::Student,
            Role::Teacher,
            Role::Admin,
            Role::PendingTeacher,
        ] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_role() {
        let err = Role::parse("superuser").unwrap_err();
        assert!(err.to_string().contains("Unknown role"));
    }

    #[test]
    fn test_pending_teacher_is_effective_student() {
        assert_eq!(Role::PendingTeacher.effective(), EffectiveRole::Student);
        assert_eq!(Role::PendingTeacher.effective().as_str(), "student");
    }

    #[test]
    fn test_other_roles_map_to_themselves() {
        assert_eq!(Role::Student.effective(), EffectiveRole::Student);
        assert_eq!(Role::Teacher.effective(), EffectiveRole::Teacher);
        assert_eq!(Role::Admin.effective(), EffectiveRole::Admin);
    }

    #[test]
    fn test_registration_roles() {
        assert!(validate_registration_role(Role::Student).is_ok());
        assert!(validate_registration_role(Role::Teacher).is_ok());
        assert!(validate_registration_role(Role::Admin).is_err());
        assert!(validate_registration_role(Role::PendingTeacher).is_err());
    }

    #[test]
    fn test_assignable_roles_exclude_pending_teacher() {
        assert!(validate_assignable_role(Role::Admin).is_ok());
        assert!(validate_assignable_role(Role::PendingTeacher).is_err());
    }
}
