//! Result and error types for the core library

use thiserror::Error;

/// Failure of a call to the remote transfer service.
///
/// The store logs these where they happen and hands them back to the caller
/// untouched: no retry, no translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a response (connect failure, timeout, ...)
    #[error("Transfer service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Transfer service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Malformed transfer service response: {0}")]
    Payload(String),
}

impl ServiceError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn payload(msg: impl Into<String>) -> Self {
        Self::Payload(msg.into())
    }

    /// HTTP status of the failed call, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Routing failures. Access denials are not errors, they are redirects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("redirect loop while navigating to {path} (gave up after {hops} hops)")]
    RedirectLoop { path: String, hops: usize },

    #[error("route table declares {0} twice")]
    DuplicateRoute(String),

    #[error("route {from} redirects to unknown path {to}")]
    UnknownRedirect { from: String, to: String },
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
