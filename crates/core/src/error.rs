//! Errors raised by workflow decisions and submission checks.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic refusal of a command or payload.
///
/// Nothing here wraps a collaborator failure; the project service reports
/// those through its own error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input, e.g. a negative price on submission.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A precondition of the requested transition does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced record (engineer, estimation) is unknown.
    #[error("{0} not found")]
    NotFound(String),

    /// The command addresses a different document than the one loaded.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Role outside the allow-list of the action.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// True for refusals caused by the caller's role rather than by state.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_subject() {
        assert_eq!(
            DomainError::not_found("engineer ENG-9").to_string(),
            "engineer ENG-9 not found"
        );
        assert_eq!(
            DomainError::invariant("estimation must be verified before approval").to_string(),
            "invariant violated: estimation must be verified before approval"
        );
    }

    #[test]
    fn only_unauthorized_is_an_authorization_failure() {
        assert!(DomainError::Unauthorized.is_authorization());
        assert!(!DomainError::validation("x").is_authorization());
    }
}
