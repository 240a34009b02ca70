//! Header transformation for both proxy directions.
//!
//! # Responsibilities
//! - Strip hop-specific headers that must not cross the proxy boundary
//! - Inject the identity token on outbound requests
//!
//! # Design Decisions
//! - `Host`/`Connection`/`Transfer-Encoding` dropped toward the upstream,
//!   `Transfer-Encoding`/`Connection` dropped toward the client; everything
//!   else (cookies, content types, custom headers) is opaque and preserved.
//!   The outbound body is always sized, so inbound chunked framing must not
//!   leak through
//! - The token goes in `X-Serverless-Authorization`, never `Authorization`:
//!   a client-supplied `Authorization` header is forwarded untouched and
//!   reaches the upstream alongside the injected one
//! - Duplicate header values are preserved in order in both directions

use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Header carrying the injected identity token.
pub const X_SERVERLESS_AUTHORIZATION: HeaderName =
    HeaderName::from_static("x-serverless-authorization");

/// Headers never forwarded toward the upstream.
const REQUEST_DENYLIST: [HeaderName; 3] = [
    HeaderName::from_static("host"),
    HeaderName::from_static("connection"),
    HeaderName::from_static("transfer-encoding"),
];

/// Headers never forwarded back toward the client.
const RESPONSE_DENYLIST: [HeaderName; 2] = [
    HeaderName::from_static("transfer-encoding"),
    HeaderName::from_static("connection"),
];

/// Build the outbound request header set: all inbound headers minus the
/// request denylist, plus the injected token header.
pub fn request_headers(
    inbound: &HeaderMap,
    token: &str,
) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut outbound = copy_except(inbound, &REQUEST_DENYLIST);

    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))?;
    outbound.insert(X_SERVERLESS_AUTHORIZATION, bearer);

    Ok(outbound)
}

/// Build the client-facing response header set: all upstream headers minus
/// the response denylist. Applies identically to success and error responses.
pub fn response_headers(upstream: &HeaderMap) -> HeaderMap {
    copy_except(upstream, &RESPONSE_DENYLIST)
}

fn copy_except(source: &HeaderMap, denylist: &[HeaderName]) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(source.len());
    // HeaderMap::iter yields one entry per value, so duplicates survive.
    for (name, value) in source.iter() {
        if denylist.contains(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_request_direction_strips_hop_headers() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::HOST, "proxy.local".parse().unwrap());
        inbound.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        inbound.insert(header::TRANSFER_ENCODING, "chunked".parse().unwrap());
        inbound.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());

        let outbound = request_headers(&inbound, "tok").unwrap();

        assert!(!outbound.contains_key(header::HOST));
        assert!(!outbound.contains_key(header::CONNECTION));
        assert!(!outbound.contains_key(header::TRANSFER_ENCODING));
        assert_eq!(outbound[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_token_injected_without_touching_authorization() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::AUTHORIZATION, "Bearer client-creds".parse().unwrap());

        let outbound = request_headers(&inbound, "identity-tok").unwrap();

        assert_eq!(outbound[header::AUTHORIZATION], "Bearer client-creds");
        assert_eq!(
            outbound[X_SERVERLESS_AUTHORIZATION],
            "Bearer identity-tok"
        );
    }

    #[test]
    fn test_custom_headers_pass_through_both_directions() {
        let mut headers = HeaderMap::new();
        headers.insert("x-trace-id", "abc123".parse().unwrap());

        let outbound = request_headers(&headers, "tok").unwrap();
        assert_eq!(outbound["x-trace-id"], "abc123");

        let relayed = response_headers(&headers);
        assert_eq!(relayed["x-trace-id"], "abc123");
    }

    #[test]
    fn test_response_direction_strips_transport_headers() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::TRANSFER_ENCODING, "chunked".parse().unwrap());
        upstream.insert(header::CONNECTION, "close".parse().unwrap());
        upstream.insert(header::SET_COOKIE, "session=1".parse().unwrap());

        let relayed = response_headers(&upstream);

        assert!(!relayed.contains_key(header::TRANSFER_ENCODING));
        assert!(!relayed.contains_key(header::CONNECTION));
        assert_eq!(relayed[header::SET_COOKIE], "session=1");
    }

    #[test]
    fn test_duplicate_values_preserved_in_order() {
        let mut upstream = HeaderMap::new();
        upstream.append(header::SET_COOKIE, "a=1".parse().unwrap());
        upstream.append(header::SET_COOKIE, "b=2".parse().unwrap());

        let relayed = response_headers(&upstream);
        let values: Vec<_> = relayed.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(values, ["a=1", "b=2"]);
    }
}
