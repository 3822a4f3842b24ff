//! Interpreted response types.
//!
//! [`RawResponse`] is the transport response descriptor with the body
//! already read; [`FetchResponse`] is the interpreted result handed to
//! callers.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::link::{PageLinks, parse_link_header};

/// Raw response descriptor: status, headers, and body text.
///
/// Attached to [`FetchError::Status`] on non-success statuses so callers
/// can inspect what came back.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// A response header as UTF-8 text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Result of a successful, interpreted call.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The raw response descriptor.
    pub response: RawResponse,
    /// Parsed JSON body; `None` when the body was empty.
    pub json: Option<serde_json::Value>,
    /// Parsed `Link` header; `None` when the header was absent.
    pub link: Option<PageLinks>,
}

impl FetchResponse {
    /// Interpret a raw response: parse the body as JSON (an empty body
    /// means no JSON) and the `Link` header when present.
    ///
    /// A non-empty body that is not valid JSON fails with the raw parse
    /// error; it is not coerced to `json = None`.
    pub fn from_raw(response: RawResponse) -> Result<Self, FetchError> {
        let json = if response.body.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&response.body)?)
        };
        let link = response.header("link").map(parse_link_header);
        Ok(Self {
            response,
            json,
            link,
        })
    }

    /// Deserialize the response body into a caller type.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.response.body)?)
    }
}
