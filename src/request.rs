//! Request description and assembly types.
//!
//! [`FetchRequest`] is the caller-facing description of a call;
//! [`ResolvedRequest`] is the transport-ready form produced by the builder
//! stage, with headers finalized and JSON bodies already stringified.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::error::FetchError;

/// A single query parameter value.
///
/// `Many` encodes as repeated `name[]=value` pairs, the query-string
/// convention for array parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Request body, stated explicitly by the caller.
///
/// The variant decides the encoding: `Text` and `Multipart` pass through
/// to the transport untouched, `Json` is stringified by the builder and
/// tagged `application/json` unless the caller set a `Content-Type` of
/// their own.
pub enum RequestBody {
    /// Plain text, sent as-is with no `Content-Type`.
    Text(String),
    /// JSON value, stringified at resolve time.
    Json(serde_json::Value),
    /// Multipart form; the transport supplies the boundary `Content-Type`.
    Multipart(reqwest::multipart::Form),
}

impl RequestBody {
    /// JSON body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, FetchError> {
        let value = serde_json::to_value(value)
            .map_err(|e| FetchError::InvalidRequest(format!("body serialization failed: {e}")))?;
        Ok(Self::Json(value))
    }
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Self::Multipart(_) => f.debug_tuple("Multipart").field(&"[form]").finish(),
        }
    }
}

/// Credentials mode forwarded to the transport.
///
/// Carried for transports that honor it; the bundled reqwest dispatch
/// delegates cookie policy to the injected `reqwest::Client`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Credentials {
    #[default]
    SameOrigin,
    Include,
    Omit,
}

impl std::fmt::Display for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::SameOrigin => "same-origin",
            Self::Include => "include",
            Self::Omit => "omit",
        })
    }
}

/// Per-request transport overrides, applied after everything else.
///
/// This is an escape hatch: values set here win over whatever the builder
/// assembled, including the method and credentials mode. Nothing is
/// validated.
#[derive(Debug, Clone, Default)]
pub struct FetchOpts {
    pub method: Option<Method>,
    pub credentials: Option<Credentials>,
    pub timeout: Option<Duration>,
}

/// Caller-facing request description.
///
/// ```rust,ignore
/// let request = FetchRequest::new("/api/v1/courses")
///     .param("per_page", "50")
///     .method(Method::POST)
///     .json(&payload)?;
/// ```
#[derive(Debug)]
pub struct FetchRequest {
    /// Path joined against the client's base URL; absolute URLs accepted.
    pub path: String,
    /// Query parameters appended to the path, in insertion order.
    pub params: Vec<(String, QueryValue)>,
    /// Extra headers merged over the defaults; these win on collision.
    pub headers: HashMap<String, String>,
    pub method: Method,
    pub body: Option<RequestBody>,
    pub fetch_opts: FetchOpts,
}

impl FetchRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            headers: HashMap::new(),
            method: Method::GET,
            body: None,
            fetch_opts: FetchOpts::default(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Plain text body, passed through unmodified.
    pub fn text(self, body: impl Into<String>) -> Self {
        self.body(RequestBody::Text(body.into()))
    }

    /// JSON body from any serializable value.
    pub fn json<T: Serialize>(self, value: &T) -> Result<Self, FetchError> {
        Ok(self.body(RequestBody::json(value)?))
    }

    /// Multipart form body, passed through unmodified.
    pub fn multipart(self, form: reqwest::multipart::Form) -> Self {
        self.body(RequestBody::Multipart(form))
    }

    pub fn fetch_opts(mut self, opts: FetchOpts) -> Self {
        self.fetch_opts = opts;
        self
    }
}

/// Transport-ready request produced by the builder stage.
#[derive(Debug)]
pub struct ResolvedRequest {
    pub url: reqwest::Url,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<ResolvedBody>,
    pub credentials: Credentials,
    pub timeout: Option<Duration>,
}

/// Body in its final wire form: JSON is already stringified.
pub enum ResolvedBody {
    Text(String),
    Multipart(reqwest::multipart::Form),
}

impl ResolvedBody {
    /// The body text, when this is a text body.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Multipart(_) => None,
        }
    }
}

impl std::fmt::Debug for ResolvedBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Multipart(_) => f.debug_tuple("Multipart").field(&"[form]").finish(),
        }
    }
}
