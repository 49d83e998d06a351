use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// Accumulated validation failures for one request shape.
///
/// A single request may violate several field rules at once; all of them are
/// collected and reported together, joined into one message. Callers rely on
/// getting every violation in one response, not just the first.
#[derive(Debug, Clone, Error)]
pub struct ValidationError {
    errors: Vec<String>,
}

impl ValidationError {
    /// Create an error from a list of per-field messages.
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Create an error carrying a single message.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// The individual violation messages, in field-declaration order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join(", "))
    }
}

/// Errors from the key-value store backing the handlers.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Hard lookup (`get`) on a key that is not set
    #[error("key `{0}` is not set")]
    MissingKey(String),

    /// The backend failed or returned data of an unexpected shape
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Terminal outcomes of method dispatch, mapped to HTTP status codes at the
/// transport boundary.
#[derive(Debug, Error)]
pub enum MethodError {
    /// Envelope or method-argument validation failed (maps to HTTP 422)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The auth check rejected the supplied token (maps to HTTP 403)
    #[error("forbidden")]
    Forbidden,

    /// The method name is not in the registry (maps to HTTP 422)
    #[error("unknown method `{method}`, choose any of: {known}")]
    UnknownMethod {
        method: String,
        /// Comma-joined list of registered method names
        known: String,
    },

    /// A store or business-logic failure escaped a handler (maps to HTTP 500)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MethodError {
    /// The HTTP status code this outcome signals.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MethodError::Validation(_) | MethodError::UnknownMethod { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            MethodError::Forbidden => StatusCode::FORBIDDEN,
            MethodError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The error text to echo to the caller, if any.
    ///
    /// Forbidden responses carry no detail, and server errors must never leak
    /// internals; both fall back to the status default at the transport.
    pub fn public_message(&self) -> Option<String> {
        match self {
            MethodError::Validation(_) | MethodError::UnknownMethod { .. } => {
                Some(self.to_string())
            }
            MethodError::Forbidden | MethodError::Store(_) => None,
        }
    }
}
