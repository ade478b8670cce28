//! Core Error Taxonomy
//!
//! Errors raised by collaborators and controllers. Field validation failures
//! are not errors: they travel as [`FieldErrors`](crate::form::FieldErrors).

use thiserror::Error;

use crate::status::Status;

/// Common result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Core-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Fetch/save/delete failed; the user may retry the same action
    #[error("network error: {0}")]
    Network(String),

    /// The record's state forbids the requested change
    #[error("cannot modify a {} record", .status.label().to_lowercase())]
    Conflict { status: Status },

    /// The remote side no longer knows the record
    #[error("not found: {0}")]
    NotFound(String),

    /// The view router was asked for a transition its current state does not allow
    #[error("cannot {event} from the {from} view")]
    InvalidTransition { from: &'static str, event: &'static str },

    /// A controller operation received an argument it cannot apply
    #[error("invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Configuration could not be parsed or failed validation
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether repeating the same action may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_status() {
        let err = CoreError::Conflict { status: Status::Completed };
        assert_eq!(err.to_string(), "cannot modify a completed record");
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(CoreError::network("timeout").is_retryable());
        assert!(!CoreError::NotFound("job 4".into()).is_retryable());
    }
}
