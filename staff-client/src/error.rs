//! Client error types

use shared::Rejection;
use std::any::Any;
use thiserror::Error;

/// Message stored in state when a worker fails with something that carries no message
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown error";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered `success: false`; the message is the server's, verbatim
    #[error("{0}")]
    Rejected(String),

    /// Non-success status whose body is not an envelope
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a local attachment failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The resource does not offer this operation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<Rejection> for ClientError {
    fn from(rejection: Rejection) -> Self {
        ClientError::Rejected(rejection.0)
    }
}

impl ClientError {
    /// Text stored as the entity's `error` after a failed operation.
    pub fn failure_message(&self) -> String {
        self.to_string()
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected(_))
    }
}

/// Extract a message from a panic payload, falling back to [`FALLBACK_ERROR_MESSAGE`].
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        FALLBACK_ERROR_MESSAGE.to_string()
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_is_verbatim() {
        let err: ClientError = Rejection("not found".into()).into();
        assert_eq!(err.failure_message(), "not found");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_status_message() {
        let err = ClientError::Status {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_eq!(err.failure_message(), "HTTP 502: Bad Gateway");
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new("worker exploded");
        assert_eq!(panic_message(boxed.as_ref()), "worker exploded");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(boxed.as_ref()), "owned message");

        let boxed: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(boxed.as_ref()), FALLBACK_ERROR_MESSAGE);
    }
}
