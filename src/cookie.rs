//! Cookie access for CSRF token attachment.
//!
//! The cookie store is modeled as an injected capability rather than
//! ambient global state, so the core stays testable without a real
//! browser or cookie jar.

use std::borrow::Cow;

/// Name of the cookie carrying the anti-forgery token.
pub const CSRF_COOKIE: &str = "_csrf_token";

/// Read-only source of the current cookie string.
///
/// The string uses the standard `name=value; name2=value2` form. Reads are
/// synchronous and may happen once per request.
pub trait CookieSource: Send + Sync {
    /// The raw cookie string, or `None` when no cookies are available.
    fn cookies(&self) -> Option<String>;
}

/// A fixed cookie string, for captured values and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCookies(pub String);

impl CookieSource for StaticCookies {
    fn cookies(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

/// Cookie sources with no cookies at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

impl CookieSource for NoCookies {
    fn cookies(&self) -> Option<String> {
        None
    }
}

/// Extract and URL-decode the CSRF token from a cookie source.
///
/// Returns `None` when the cookie is absent. Values that do not decode
/// cleanly are passed through as-is.
pub(crate) fn csrf_token(source: &dyn CookieSource) -> Option<String> {
    let cookies = source.cookies()?;
    for pair in cookies.split(';') {
        if let Some((name, raw)) = pair.trim().split_once('=')
            && name == CSRF_COOKIE
        {
            return Some(
                urlencoding::decode(raw)
                    .map(Cow::into_owned)
                    .unwrap_or_else(|_| raw.to_string()),
            );
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_among_other_cookies() {
        let source = StaticCookies("session=abc; _csrf_token=the_token; theme=dark".to_string());
        assert_eq!(csrf_token(&source).as_deref(), Some("the_token"));
    }

    #[test]
    fn url_decodes_the_token_value() {
        let source = StaticCookies("_csrf_token=a%2Fb%3D%3D".to_string());
        assert_eq!(csrf_token(&source).as_deref(), Some("a/b=="));
    }

    #[test]
    fn absent_cookie_yields_none() {
        assert_eq!(csrf_token(&StaticCookies("session=abc".to_string())), None);
        assert_eq!(csrf_token(&NoCookies), None);
    }

    #[test]
    fn prefix_named_cookies_do_not_match() {
        let source = StaticCookies("_csrf_token_old=stale; _csrf_token=fresh".to_string());
        assert_eq!(csrf_token(&source).as_deref(), Some("fresh"));
    }

    #[test]
    fn value_containing_equals_is_kept_whole() {
        let source = StaticCookies("_csrf_token=a=b".to_string());
        assert_eq!(csrf_token(&source).as_deref(), Some("a=b"));
    }
}
