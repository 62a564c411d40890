//! Error types for the render client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed low-level cause carried by connection failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while talking to the render server
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration (bad base URL, unknown option literal)
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The underlying HTTP client could not be built
    #[error("Client initialization failed: {0}")]
    InitializationError(String),

    /// The request never completed: DNS failure, refusal, timeout, broken body
    #[error("Connection failed: {message}")]
    ConnectionError {
        message: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The payload could not be encoded as JSON
    #[error("Serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Writing a rendered artifact failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn connection(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::ConnectionError {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Human-readable message without the kind prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Error::ConfigError(m) | Error::InitializationError(m) => m.clone(),
            Error::ConnectionError { message, .. } | Error::ServerError { message, .. } => {
                message.clone()
            }
            Error::SerializationError(e) => e.to_string(),
            Error::IoError(e) => e.to_string(),
        }
    }

    /// HTTP status for server failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Error::ConnectionError { .. })
    }

    pub fn is_server(&self) -> bool {
        matches!(self, Error::ServerError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_exposes_status_and_message() {
        let err = Error::ServerError {
            status: 422,
            message: "bad margins".into(),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.message(), "bad margins");
        assert!(err.is_server());
        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Server error (422): bad margins");
    }

    #[test]
    fn connection_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::connection("POST /render failed", io);
        assert!(err.is_connection());
        assert_eq!(err.status(), None);
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "refused");
    }
}
