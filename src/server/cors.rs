//! CORS Handling
//!
//! Allows every origin, method and header, with credentials. Simple
//! requests get `*`; preflights and requests carrying cookies get the
//! request origin echoed back, since browsers reject `*` for credentialed
//! requests.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderMap, HeaderValue};
use hyper::{Method, Request, Response, StatusCode};

/// Methods advertised on preflight responses
const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";

/// Preflight cache lifetime in seconds
const MAX_AGE_SECS: &str = "600";

/// Check if a request is a CORS preflight.
pub fn is_preflight<B>(req: &Request<B>) -> bool {
    req.method() == Method::OPTIONS
        && req.headers().contains_key(header::ORIGIN)
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Answer a preflight request.
pub fn preflight_response<B>(req: &Request<B>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(b"OK")));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE_SECS),
    );
    if let Some(requested) = req.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
    }

    response
}

/// Check if the response must name the request origin instead of `*`.
pub fn echo_origin<B>(req: &Request<B>) -> bool {
    is_preflight(req) || req.headers().contains_key(header::COOKIE)
}

/// Attach origin headers to a response.
///
/// Nothing is added when the request carried no `Origin`.
pub fn apply(headers: &mut HeaderMap, origin: Option<&HeaderValue>, echo: bool) {
    let Some(origin) = origin else {
        return;
    };

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    if echo {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    } else {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().method(method).uri("/health");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn test_preflight_detection() {
        assert!(is_preflight(&request(
            Method::OPTIONS,
            &[
                ("origin", "https://example.com"),
                ("access-control-request-method", "GET")
            ]
        )));
        assert!(!is_preflight(&request(
            Method::OPTIONS,
            &[("origin", "https://example.com")]
        )));
        assert!(!is_preflight(&request(
            Method::GET,
            &[
                ("origin", "https://example.com"),
                ("access-control-request-method", "GET")
            ]
        )));
    }

    #[test]
    fn test_preflight_echoes_requested_headers() {
        let req = request(
            Method::OPTIONS,
            &[
                ("origin", "https://example.com"),
                ("access-control-request-method", "GET"),
                ("access-control-request-headers", "x-custom"),
            ],
        );
        let resp = preflight_response(&req);

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "x-custom");
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
    }

    #[test]
    fn test_apply_without_origin() {
        let mut headers = HeaderMap::new();
        apply(&mut headers, None, true);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_apply_wildcard_for_simple_request() {
        let mut headers = HeaderMap::new();
        let origin = HeaderValue::from_static("https://example.com");
        apply(&mut headers, Some(&origin), false);

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert!(headers.get(header::VARY).is_none());
    }

    #[test]
    fn test_apply_echoes_origin() {
        let mut headers = HeaderMap::new();
        let origin = HeaderValue::from_static("https://example.com");
        apply(&mut headers, Some(&origin), true);

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://example.com");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::VARY], "Origin");
    }

    #[test]
    fn test_echo_origin_with_cookie_or_preflight() {
        let origin = ("origin", "https://example.com");
        assert!(!echo_origin(&request(Method::GET, &[origin])));
        assert!(echo_origin(&request(Method::GET, &[origin, ("cookie", "session=1")])));
        assert!(echo_origin(&request(
            Method::OPTIONS,
            &[origin, ("access-control-request-method", "GET")]
        )));
    }
}
