//! Error types for the fetch helper.
//!
//! Transport failures and non-success HTTP statuses are normalized into a
//! single enum so callers can branch uniformly. A malformed JSON body on a
//! success status is the one deliberate exception: it surfaces as the raw
//! parse error instead of a normalized failure.

use crate::response::RawResponse;

/// Unified error type for request building, dispatch, and interpretation.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network-level failure before any response was received.
    ///
    /// The message is the transport's own failure message, verbatim.
    #[error("{0}")]
    Transport(String),

    /// A response was received but its status is outside the success range.
    ///
    /// `message` is the status's canonical reason phrase (e.g.
    /// `Unauthorized` for 401); `response` is the full descriptor so the
    /// status code and headers stay inspectable on failure.
    #[error("{message}")]
    Status {
        message: String,
        response: RawResponse,
    },

    /// Response body was present but not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The request could not be assembled (bad URL, header name/value, or
    /// unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// The response descriptor, when one was received.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status code of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
