use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// SQLSTATE raised when a row violates a check constraint.
pub const CHECK_VIOLATION: &str = "23514";
/// SQLSTATE raised when the caller lacks the privilege for an operation.
pub const INSUFFICIENT_PRIVILEGE: &str = "42501";

const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorErrorKind {
    ConstraintViolation,
    PermissionDenied,
    Other,
}

/// Failure reported by the external data store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollaboratorError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl CollaboratorError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }

    pub fn kind(&self) -> CollaboratorErrorKind {
        match self.code.as_deref() {
            Some(CHECK_VIOLATION) => CollaboratorErrorKind::ConstraintViolation,
            Some(INSUFFICIENT_PRIVILEGE) => CollaboratorErrorKind::PermissionDenied,
            _ => CollaboratorErrorKind::Other,
        }
    }

    /// Text shown to the user. Constraint and permission failures are
    /// rewritten; anything else is passed through verbatim.
    pub fn user_message(&self) -> String {
        match self.kind() {
            CollaboratorErrorKind::ConstraintViolation => {
                "The data store rejected the movement because its cadence is not allowed by the repeats_every constraint. Update the constraint and try again.".into()
            }
            CollaboratorErrorKind::PermissionDenied => {
                "Permission denied. Ensure delete policies are configured for accounts and their movements.".into()
            }
            CollaboratorErrorKind::Other => self
                .message
                .clone()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        }
    }
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for CollaboratorError {}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
    /// Cleanup after a partially applied operation failed as well. Every
    /// failed cleanup is listed after the original failure.
    #[error("{original} {}", join_messages(.cleanup))]
    Compensation {
        original: CollaboratorError,
        cleanup: Vec<CollaboratorError>,
    },
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
}

fn join_messages(errors: &[CollaboratorError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl CoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}
