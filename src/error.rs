//! Defines the error type returned by every gitlab operation
use core::fmt::{Display, Formatter};
use reqwest::{Method, StatusCode};

/// Status code(s) a gitlab endpoint is expected to answer with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedStatus {
    /// Any `2xx` status
    Success,
    /// This exact status, nothing else
    Exactly(StatusCode),
}

impl ExpectedStatus {
    /// Used by every create (`POST`) endpoint
    pub const CREATED: Self = Self::Exactly(StatusCode::CREATED);

    /// Returns `true` if `status` is acceptable
    #[must_use]
    pub fn matches(self, status: StatusCode) -> bool {
        match self {
            Self::Success => status.is_success(),
            Self::Exactly(expected) => status == expected,
        }
    }
}

impl Display for ExpectedStatus {
    #[expect(clippy::absolute_paths, reason = "Use a specific Result type")]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::Success => write!(f, "2xx"),
            Self::Exactly(status) => write!(f, "{}", status.as_u16()),
        }
    }
}

/// Errors raised while talking to gitlab
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or its body could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Gitlab answered with a status code the endpoint does not allow
    #[error("{method} {url} returned {status}, expected {expected} : {body}")]
    UnexpectedStatus {
        /// HTTP method of the failed request
        method: Method,
        /// Full url of the failed request
        url: String,
        /// Status code returned by gitlab
        status: StatusCode,
        /// What the endpoint expects
        expected: ExpectedStatus,
        /// Raw response body, usually a gitlab error message
        body: String,
    },
    /// The response body is not the JSON we expect
    #[error("error decoding the response of {url} : {source}")]
    Decode {
        /// Full url of the request
        url: String,
        /// Underlying `serde_json` error
        #[source]
        source: serde_json::Error,
    },
    /// The `link` header of a page can't be read, the following pages can't be reached
    #[error("invalid link header in the response of {url} : {header}")]
    Pagination {
        /// Full url of the page
        url: String,
        /// Raw `link` header, lossily decoded
        header: String,
    },
    /// No gitlab user has this username
    #[error("gitlab user '{0}' not found")]
    UserNotFound(String),
    /// No gitlab group has this full path
    #[error("gitlab group '{0}' not found")]
    GroupNotFound(String),
    /// Invalid or missing configuration value
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Status code returned by gitlab, if this error comes from an unexpected response
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match *self {
            Self::UnexpectedStatus { status, .. } => Some(status),
            Self::Transport(_)
            | Self::Decode { .. }
            | Self::Pagination { .. }
            | Self::UserNotFound(_)
            | Self::GroupNotFound(_)
            | Self::Config(_) => None,
        }
    }
}
