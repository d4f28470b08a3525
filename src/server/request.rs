use crate::body;
use crate::dispatcher::HeaderVec;
use crate::router::ParamVec;
use http::Method;
use may_minihttp::Request;
use std::sync::Arc;
use tracing::debug;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    /// HTTP method, passed through untouched.
    pub method: Method,
    /// Request path with the query string stripped.
    pub path: String,
    /// HTTP headers (lowercase names).
    pub headers: HeaderVec,
    /// Parsed query string parameters, in wire order.
    pub query_params: ParamVec,
    /// Normalized request body (see [`crate::body::normalize`]).
    pub body: Option<serde_json::Value>,
}

/// Parse query string parameters from a URL path.
///
/// Extracts everything after the `?` character and URL-decodes parameter
/// names and values. Duplicates are kept in wire order; lookups resolve to
/// the last occurrence.
#[must_use]
pub fn parse_query_params(path: &str) -> ParamVec {
    match path.find('?') {
        Some(pos) => {
            let query_str = &path[pos + 1..];
            url::form_urlencoded::parse(query_str.as_bytes())
                .map(|(k, v)| (Arc::from(k.as_ref()), v.to_string()))
                .collect()
        }
        None => ParamVec::new(),
    }
}

/// Extract method, path, headers, query parameters and the normalized body
/// from a raw `may_minihttp` request.
pub fn parse_request(req: Request) -> ParsedRequest {
    // httparse only admits token characters in the method, so the
    // conversion cannot fail on a request that reached this point.
    let method = Method::from_bytes(req.method().as_bytes()).unwrap_or(Method::GET);
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase().as_str()),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);

    // The host never pre-parses bodies for us, so `existing` is None here;
    // normalize() still honors pre-parsed bodies for callers that have one.
    let body = body::normalize(&method, None, req.body());

    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        query_param_count = query_params.len(),
        has_body = body.is_some(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        query_params,
        body,
    }
}
