//! Failure taxonomy shared by every page controller.

use shared::error::{ApiException, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("{0} not found")]
    NotFound(String),
    /// Remote constraint rejection; the message is shown to the user as-is.
    #[error("{0}")]
    ValidationFailure(String),
    #[error("sign in required")]
    Unauthenticated,
    #[error("malformed {collection} record: {message}")]
    Decode { collection: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    NotFound,
    Validation,
    Auth,
    Payload,
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::NetworkFailure(_) => ErrorKind::Network,
            DataError::NotFound(_) => ErrorKind::NotFound,
            DataError::ValidationFailure(_) => ErrorKind::Validation,
            DataError::Unauthenticated => ErrorKind::Auth,
            DataError::Decode { .. } => ErrorKind::Payload,
        }
    }

    pub fn decode(collection: &str, err: impl std::fmt::Display) -> Self {
        DataError::Decode {
            collection: collection.to_string(),
            message: err.to_string(),
        }
    }

    /// Hint shown next to the message at the page boundary.
    pub fn retry_hint(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Network => "Check the store URL or your connection and reload.",
            ErrorKind::NotFound => "Check the identifier and reload.",
            ErrorKind::Validation => "Correct the highlighted fields and save again.",
            ErrorKind::Auth => "Sign in and reload.",
            ErrorKind::Payload => "The stored record is malformed; reload or contact support.",
        }
    }
}

impl From<ApiException> for DataError {
    fn from(value: ApiException) -> Self {
        match value.code {
            ErrorCode::Validation => DataError::ValidationFailure(value.message),
            ErrorCode::NotFound => DataError::NotFound(value.message),
            ErrorCode::Unauthorized | ErrorCode::Forbidden => DataError::Unauthenticated,
            ErrorCode::Internal => {
                DataError::NetworkFailure(format!("{:?}: {}", value.code, value.message))
            }
        }
    }
}

/// Errors of the edit sub-mode. Only `Save` carries a remote failure; the rest
/// are misuse of the controller by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("nothing loaded to edit")]
    NotReady,
    #[error("no edit in progress")]
    NotEditing,
    #[error("a save is already in flight")]
    SaveInFlight,
    #[error("page was reloaded or closed while saving")]
    Superseded,
    #[error(transparent)]
    Save(#[from] DataError),
}
