//! Outbound caching headers.
//!
//! Turns a [`CachePolicy`] into `Cache-Control`, `Vary` and
//! `CDN-Cache-Control` values. Pure header writing, no state.

use std::convert::Infallible;

use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA, VARY};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponseParts, Response, ResponseParts};
use tracing::warn;

use crate::policy::CachePolicy;

/// Header names and fixed values.
pub mod header_values {
    /// Surrogate header honoured by CDNs independently of `Cache-Control`.
    pub const CDN_CACHE_CONTROL: &str = "cdn-cache-control";
    pub const NO_STORE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";
    pub const PRAGMA_NO_CACHE: &str = "no-cache";
    pub const EXPIRES_NOW: &str = "0";
    pub const VARY_DEFAULT: &str = "Accept-Encoding";
    pub const VARY_AUTH: &str = "Accept-Encoding, Authorization";
}

// == Cache-Control ==
/// The `Cache-Control` value for a cacheable policy.
///
/// Ordered as visibility, `max-age`, `s-maxage`, then `stale-while-revalidate`
/// when a non-zero window is set.
pub fn cache_control_value(policy: &CachePolicy) -> String {
    let visibility = if policy.vary_by_auth { "private" } else { "public" };
    let mut parts = vec![
        visibility.to_string(),
        format!("max-age={}", policy.browser_seconds),
        format!("s-maxage={}", policy.edge_seconds),
    ];

    if let Some(swr) = policy.stale_while_revalidate_seconds.filter(|&s| s != 0) {
        parts.push(format!("stale-while-revalidate={swr}"));
    }

    parts.join(", ")
}

// == Apply Headers ==
/// Writes the caching headers for `policy`, replacing any already present.
///
/// A policy with both lifetimes at zero always yields the no-store triple
/// (`Cache-Control`, `Pragma`, `Expires`) and nothing else.
pub fn apply_headers(headers: &mut HeaderMap, policy: &CachePolicy) {
    if policy.is_no_store() {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(header_values::NO_STORE));
        headers.insert(PRAGMA, HeaderValue::from_static(header_values::PRAGMA_NO_CACHE));
        headers.insert(EXPIRES, HeaderValue::from_static(header_values::EXPIRES_NOW));
        return;
    }

    insert_formatted(headers, CACHE_CONTROL, cache_control_value(policy));

    let vary = if policy.vary_by_auth {
        header_values::VARY_AUTH
    } else {
        header_values::VARY_DEFAULT
    };
    headers.insert(VARY, HeaderValue::from_static(vary));

    if policy.edge_seconds > 0 {
        insert_formatted(
            headers,
            HeaderName::from_static(header_values::CDN_CACHE_CONTROL),
            format!("max-age={}", policy.edge_seconds),
        );
    }
}

/// Applies `policy` to an already built response.
pub fn apply_to_response(response: &mut Response, policy: &CachePolicy) {
    apply_headers(response.headers_mut(), policy);
}

fn insert_formatted(headers: &mut HeaderMap, name: HeaderName, value: String) {
    match HeaderValue::try_from(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(err) => warn!(header = %name, error = %err, "skipping unencodable cache header"),
    }
}

/// Lets handlers return `(policy, body)` directly.
impl IntoResponseParts for CachePolicy {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        apply_headers(res.headers_mut(), &self);
        Ok(res)
    }
}
