//! Default header assembly and merging.
//!
//! Every request starts from a fixed default set; caller-supplied headers
//! are merged on top and win on collision.

use std::collections::HashMap;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};

use crate::cookie::{self, CookieSource};
use crate::error::FetchError;

/// JSON media type variant asking the server to serialize numeric IDs as
/// strings, with plain JSON as the fallback.
pub const ACCEPT_STRING_IDS: &str = "application/json+canvas-string-ids, application/json";

/// Header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Marker header identifying programmatic requests.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Build the default header set: the JSON `Accept` variant,
/// `X-Requested-With`, and `X-CSRF-Token` when the cookie source provides
/// a token. The CSRF header is omitted entirely when the cookie is absent.
pub fn default_headers(cookies: &dyn CookieSource) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_STRING_IDS));
    headers.insert(
        REQUESTED_WITH_HEADER,
        HeaderValue::from_static("XMLHttpRequest"),
    );
    if let Some(token) = cookie::csrf_token(cookies)
        && let Ok(value) = HeaderValue::from_str(&token)
    {
        headers.insert(CSRF_HEADER, value);
    }
    headers
}

/// Merge caller-supplied headers into `base`; caller values win on
/// collision.
pub fn merge_headers(
    base: &mut HeaderMap,
    extra: &HashMap<String, String>,
) -> Result<(), FetchError> {
    for (key, value) in extra {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| FetchError::InvalidRequest(format!("invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            FetchError::InvalidRequest(format!("invalid header value '{value}': {e}"))
        })?;
        base.insert(name, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::{NoCookies, StaticCookies};

    #[test]
    fn defaults_include_accept_and_requested_with() {
        let headers = default_headers(&NoCookies);
        assert_eq!(headers.get(ACCEPT).unwrap(), ACCEPT_STRING_IDS);
        assert_eq!(headers.get(REQUESTED_WITH_HEADER).unwrap(), "XMLHttpRequest");
        assert!(!headers.contains_key(CSRF_HEADER));
    }

    #[test]
    fn csrf_header_present_when_cookie_is() {
        let cookies = StaticCookies("_csrf_token=the%20token".to_string());
        let headers = default_headers(&cookies);
        assert_eq!(headers.get(CSRF_HEADER).unwrap(), "the token");
    }

    #[test]
    fn caller_headers_override_defaults() {
        let mut headers = default_headers(&NoCookies);
        let extra = HashMap::from([("Accept".to_string(), "text/plain".to_string())]);
        merge_headers(&mut headers, &extra).unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "text/plain");
    }

    #[test]
    fn invalid_header_name_is_a_build_error() {
        let mut headers = HeaderMap::new();
        let extra = HashMap::from([("bad header".to_string(), "v".to_string())]);
        let err = merge_headers(&mut headers, &extra).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }
}
