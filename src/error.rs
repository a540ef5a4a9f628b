//! Error types for the Nyaya SDK.
//!
//! This module defines the error type system for everything that can go
//! wrong while configuring a consultation session or dispatching a query
//! to the Nyaya backend.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for the Nyaya SDK.
#[derive(Clone, Debug)]
pub enum Error {
    /// One or more of the mandatory session filters is unset at start time.
    ConfigurationIncomplete {
        /// Human-readable error message.
        message: String,
        /// Names of the filters that are still unset.
        missing: Vec<String>,
    },

    /// A candidate attachment exceeds the size policy.
    AttachmentTooLarge {
        /// File name of the rejected candidate.
        name: String,
        /// Size of the rejected candidate in bytes.
        byte_size: u64,
        /// The policy limit in bytes.
        limit: u64,
    },

    /// The backend rejected a query or the transport failed mid-request.
    RequestFailed {
        /// HTTP status code, if a response was received.
        status_code: Option<u16>,
        /// Human-readable error message, derived per the backend's
        /// error-body conventions.
        message: String,
    },

    /// The backend returned a success status but the body did not parse.
    ResponseParse {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Connection error.
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// HTTP client error.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Error during JSON serialization or deserialization.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Error during validation of request parameters.
    Validation {
        /// Human-readable error message.
        message: String,
        /// Parameter that failed validation.
        param: Option<String>,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },

    /// A URL parsing or manipulation error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },
}

impl Error {
    /// Creates a new configuration-incomplete error.
    pub fn configuration_incomplete(message: impl Into<String>, missing: Vec<String>) -> Self {
        Error::ConfigurationIncomplete {
            message: message.into(),
            missing,
        }
    }

    /// Creates a new attachment-too-large error.
    pub fn attachment_too_large(name: impl Into<String>, byte_size: u64, limit: u64) -> Self {
        Error::AttachmentTooLarge {
            name: name.into(),
            byte_size,
            limit,
        }
    }

    /// Creates a new request-failed error.
    pub fn request_failed(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Error::RequestFailed {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new response-parse error.
    pub fn response_parse(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::ResponseParse {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>, param: Option<String>) -> Self {
        Error::Validation {
            message: message.into(),
            param,
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Returns true if this error is a configuration-incomplete error.
    pub fn is_configuration_incomplete(&self) -> bool {
        matches!(self, Error::ConfigurationIncomplete { .. })
    }

    /// Returns true if this error is an attachment-too-large error.
    pub fn is_attachment_too_large(&self) -> bool {
        matches!(self, Error::AttachmentTooLarge { .. })
    }

    /// Returns true if this error is a request failure.
    pub fn is_request_failed(&self) -> bool {
        matches!(self, Error::RequestFailed { .. })
    }

    /// Returns true if this error is a response-parse failure.
    pub fn is_response_parse(&self) -> bool {
        matches!(self, Error::ResponseParse { .. })
    }

    /// Returns true if this error is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// Returns true if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns the HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Returns the message to surface inline to the person chatting.
    ///
    /// For errors whose `message` field was already derived for display
    /// (the request-failure ladder, the configuration gate) this is that
    /// message verbatim; other errors fall back to their full rendering.
    pub fn user_message(&self) -> String {
        match self {
            Error::ConfigurationIncomplete { message, .. }
            | Error::RequestFailed { message, .. }
            | Error::ResponseParse { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigurationIncomplete { message, missing } => {
                if missing.is_empty() {
                    write!(f, "Configuration incomplete: {message}")
                } else {
                    write!(
                        f,
                        "Configuration incomplete: {message} (missing: {})",
                        missing.join(", ")
                    )
                }
            }
            Error::AttachmentTooLarge {
                name,
                byte_size,
                limit,
            } => {
                write!(
                    f,
                    "Attachment too large: {name} is {byte_size} bytes (limit {limit})"
                )
            }
            Error::RequestFailed {
                status_code,
                message,
            } => {
                if let Some(status_code) = status_code {
                    write!(f, "Request failed (HTTP {status_code}): {message}")
                } else {
                    write!(f, "Request failed: {message}")
                }
            }
            Error::ResponseParse { message, .. } => {
                write!(f, "Response parse error: {message}")
            }
            Error::Connection { message, .. } => {
                write!(f, "Connection error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Serialization { message, .. } => {
                write!(f, "Serialization error: {message}")
            }
            Error::Validation { message, param } => {
                if let Some(param) = param {
                    write!(f, "Validation error: {message} (parameter: {param})")
                } else {
                    write!(f, "Validation error: {message}")
                }
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::ResponseParse { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Connection { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Io { source, .. } => Some(source),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for Nyaya operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display() {
        let err = Error::request_failed(Some(500), "Server error occurred. Please try again later.");
        assert_eq!(
            err.to_string(),
            "Request failed (HTTP 500): Server error occurred. Please try again later."
        );
        assert_eq!(err.status_code(), Some(500));

        let err = Error::request_failed(None, "connection reset");
        assert_eq!(err.to_string(), "Request failed: connection reset");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn user_message_strips_prefix() {
        let err = Error::request_failed(Some(422), "quota exhausted");
        assert_eq!(err.user_message(), "quota exhausted");

        let err = Error::configuration_incomplete(
            "Please fill all filters",
            vec!["legal area".to_string()],
        );
        assert_eq!(err.user_message(), "Please fill all filters");
    }

    #[test]
    fn attachment_too_large_display() {
        let err = Error::attachment_too_large("case.pdf", 6 * 1024 * 1024, 5 * 1024 * 1024);
        assert!(err.is_attachment_too_large());
        assert_eq!(
            err.to_string(),
            "Attachment too large: case.pdf is 6291456 bytes (limit 5242880)"
        );
    }

    #[test]
    fn predicates() {
        assert!(Error::connection("refused", None).is_connection());
        assert!(Error::response_parse("bad body", None).is_response_parse());
        assert!(Error::validation("unknown code", Some("language".to_string())).is_validation());
        assert!(!Error::validation("unknown code", None).is_request_failed());
    }
}
