//! Request execution: builder, dispatch, and failure normalization.
//!
//! [`FetchClient`] turns a [`FetchRequest`] into a transport-ready
//! [`ResolvedRequest`], sends it through the shared `reqwest` client, and
//! normalizes the outcome: success resolves to an interpreted
//! [`FetchResponse`], transport failures and non-success statuses reject
//! with [`FetchError`].

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};

use crate::cookie::{CookieSource, NoCookies, StaticCookies};
use crate::error::FetchError;
use crate::headers;
use crate::request::{FetchRequest, QueryValue, RequestBody, ResolvedBody, ResolvedRequest};
use crate::response::{FetchResponse, RawResponse};

/// Client for issuing normalized JSON API requests.
///
/// Holds the base URL, the shared `reqwest` client, and the cookie source
/// used for CSRF attachment. Cloning is cheap; clones share the underlying
/// connection pool. Each call is independent: the client carries no
/// per-request state.
#[derive(Clone)]
pub struct FetchClient {
    base_url: reqwest::Url,
    http_client: reqwest::Client,
    cookies: Arc<dyn CookieSource>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Builder for [`FetchClient`].
pub struct FetchClientBuilder {
    base_url: String,
    http_client: Option<reqwest::Client>,
    cookies: Option<Arc<dyn CookieSource>>,
}

impl FetchClientBuilder {
    /// Inject a preconfigured `reqwest` client (connection pool reuse,
    /// proxies, cookie policy).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Inject the cookie source used for CSRF token attachment.
    pub fn cookie_source(mut self, source: impl CookieSource + 'static) -> Self {
        self.cookies = Some(Arc::new(source));
        self
    }

    /// Shorthand for a fixed cookie string.
    pub fn cookies(self, cookies: impl Into<String>) -> Self {
        self.cookie_source(StaticCookies(cookies.into()))
    }

    pub fn build(self) -> Result<FetchClient, FetchError> {
        let base_url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            FetchError::InvalidRequest(format!("invalid base URL '{}': {e}", self.base_url))
        })?;
        Ok(FetchClient {
            base_url,
            http_client: self.http_client.unwrap_or_default(),
            cookies: self.cookies.unwrap_or_else(|| Arc::new(NoCookies)),
        })
    }
}

impl FetchClient {
    /// Client with a default `reqwest` client and no cookies.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> FetchClientBuilder {
        FetchClientBuilder {
            base_url: base_url.into(),
            http_client: None,
            cookies: None,
        }
    }

    /// Issue a request: resolve, dispatch, and interpret it.
    ///
    /// Fails with [`FetchError::Transport`] when no response was received
    /// and with [`FetchError::Status`] when the response status is outside
    /// the success range; the latter carries the response descriptor.
    pub async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let resolved = self.resolve(request)?;
        let response = self.dispatch(resolved).await?;
        if !response.is_success() {
            return Err(status_error(response));
        }
        FetchResponse::from_raw(response)
    }

    /// Assemble the final URL, headers, and body for a request.
    ///
    /// Exposed separately from [`fetch`](Self::fetch) so the builder
    /// output can be inspected without touching the network.
    pub fn resolve(&self, request: FetchRequest) -> Result<ResolvedRequest, FetchError> {
        let FetchRequest {
            path,
            params,
            headers: extra_headers,
            method,
            body,
            fetch_opts,
        } = request;

        let mut url = match reqwest::Url::parse(&path) {
            Ok(url) => url,
            Err(_) => self.base_url.join(&path).map_err(|e| {
                FetchError::InvalidRequest(format!("invalid path '{path}': {e}"))
            })?,
        };
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &params {
                match value {
                    QueryValue::One(v) => {
                        pairs.append_pair(name, v);
                    }
                    QueryValue::Many(vs) => {
                        let name = format!("{name}[]");
                        for v in vs {
                            pairs.append_pair(&name, v);
                        }
                    }
                }
            }
        }

        let mut headers = headers::default_headers(self.cookies.as_ref());
        headers::merge_headers(&mut headers, &extra_headers)?;

        let body = match body {
            None => None,
            Some(RequestBody::Text(text)) => Some(ResolvedBody::Text(text)),
            Some(RequestBody::Multipart(form)) => Some(ResolvedBody::Multipart(form)),
            Some(RequestBody::Json(value)) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                let text = serde_json::to_string(&value).map_err(|e| {
                    FetchError::InvalidRequest(format!("body serialization failed: {e}"))
                })?;
                Some(ResolvedBody::Text(text))
            }
        };

        Ok(ResolvedRequest {
            url,
            method: fetch_opts.method.unwrap_or(method),
            headers,
            body,
            credentials: fetch_opts.credentials.unwrap_or_default(),
            timeout: fetch_opts.timeout,
        })
    }

    /// Send a resolved request and read the response body.
    ///
    /// Any failure here, including while reading the body, is a transport
    /// failure; status interpretation happens in the caller.
    async fn dispatch(&self, request: ResolvedRequest) -> Result<RawResponse, FetchError> {
        let ResolvedRequest {
            url,
            method,
            headers,
            body,
            credentials,
            timeout,
        } = request;
        tracing::debug!(%method, %url, %credentials, "dispatching request");

        let mut rb = self.http_client.request(method, url);
        match body {
            // Headers go on after the form so an explicit caller
            // Content-Type overrides the boundary value reqwest sets.
            Some(ResolvedBody::Multipart(form)) => {
                rb = rb.multipart(form).headers(headers);
            }
            Some(ResolvedBody::Text(text)) => {
                rb = rb.headers(headers).body(text);
            }
            None => {
                rb = rb.headers(headers);
            }
        }
        if let Some(timeout) = timeout {
            rb = rb.timeout(timeout);
        }

        let response = rb.send().await?;
        let status = response.status().as_u16();
        let response_headers = response.headers().clone();
        let body = response.text().await?;
        tracing::debug!(status, "response received");

        Ok(RawResponse {
            status,
            headers: response_headers,
            body,
        })
    }

    /// GET convenience wrapper.
    pub async fn get(&self, path: &str) -> Result<FetchResponse, FetchError> {
        self.fetch(FetchRequest::new(path)).await
    }

    /// POST with a body.
    pub async fn post(&self, path: &str, body: RequestBody) -> Result<FetchResponse, FetchError> {
        self.fetch(FetchRequest::new(path).method(Method::POST).body(body))
            .await
    }

    /// PUT with a body.
    pub async fn put(&self, path: &str, body: RequestBody) -> Result<FetchResponse, FetchError> {
        self.fetch(FetchRequest::new(path).method(Method::PUT).body(body))
            .await
    }

    /// DELETE convenience wrapper.
    pub async fn delete(&self, path: &str) -> Result<FetchResponse, FetchError> {
        self.fetch(FetchRequest::new(path).method(Method::DELETE))
            .await
    }
}

/// Map a non-success response to a [`FetchError::Status`] with the
/// status's canonical reason phrase as the message.
fn status_error(response: RawResponse) -> FetchError {
    let message = reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", response.status));
    FetchError::Status { message, response }
}
