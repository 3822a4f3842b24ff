//! fetch-api
//!
//! Normalized request helper for JSON REST APIs: default headers, CSRF
//! token attachment from a cookie source, query-parameter encoding,
//! `Link` pagination parsing, and uniform failure reporting.
//!
//! The entry point is [`FetchClient`]: build one against a base URL, then
//! issue requests described by [`FetchRequest`]. Successful calls resolve
//! to a [`FetchResponse`] carrying the parsed JSON body and pagination
//! links; failures are normalized into [`FetchError`] so callers can
//! branch uniformly on transport failure vs. non-success HTTP status.
#![deny(unsafe_code)]

pub mod client;
pub mod cookie;
pub mod error;
pub mod headers;
pub mod link;
pub mod request;
pub mod response;

pub use client::{FetchClient, FetchClientBuilder};
pub use cookie::{CookieSource, NoCookies, StaticCookies};
pub use error::FetchError;
pub use link::PageLinks;
pub use request::{
    Credentials, FetchOpts, FetchRequest, QueryValue, RequestBody, ResolvedBody, ResolvedRequest,
};
pub use response::{FetchResponse, RawResponse};
