//! Request body normalization.
//!
//! Turns a raw, possibly-unconsumed request stream into a parsed value or a
//! safe fallback so routing can proceed regardless of how malformed the
//! input is. This step is total: it always produces a value and never
//! returns an error.

use http::Method;
use serde_json::{Map, Value};
use std::io::Read;
use tracing::debug;

/// Normalize a request body.
///
/// Rules, in order:
/// - A body already parsed upstream is passed through untouched.
/// - GET, HEAD and DELETE carry no payload; the body stays absent.
/// - Otherwise the stream is accumulated into a string and parsed as JSON.
///   A parse failure keeps the raw string as the body; a stream error falls
///   back to an empty JSON object; an empty stream yields no body.
pub fn normalize<R: Read>(method: &Method, existing: Option<Value>, mut stream: R) -> Option<Value> {
    if existing.is_some() {
        return existing;
    }
    if *method == Method::GET || *method == Method::HEAD || *method == Method::DELETE {
        return None;
    }

    let mut raw = String::new();
    match stream.read_to_string(&mut raw) {
        Err(err) => {
            debug!(method = %method, error = %err, "body stream failed, defaulting to empty object");
            Some(Value::Object(Map::new()))
        }
        Ok(0) => None,
        Ok(size) => match serde_json::from_str(&raw) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                debug!(method = %method, body_size_bytes = size, "body is not JSON, keeping raw string");
                Some(Value::String(raw))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;

    struct BrokenStream;

    impl Read for BrokenStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_pre_parsed_body_is_untouched() {
        let parsed = json!({"name": "Corner Deli"});
        let out = normalize(&Method::POST, Some(parsed.clone()), io::empty());
        assert_eq!(out, Some(parsed));
    }

    #[test]
    fn test_payloadless_verbs_have_no_body() {
        for method in [Method::GET, Method::HEAD, Method::DELETE] {
            let out = normalize(&method, None, &b"{\"x\":1}"[..]);
            assert_eq!(out, None, "{method} should not read a body");
        }
    }

    #[test]
    fn test_valid_json_is_parsed() {
        let out = normalize(&Method::POST, None, &b"{\"name\":\"Beanery\"}"[..]);
        assert_eq!(out, Some(json!({"name": "Beanery"})));
    }

    #[test]
    fn test_malformed_json_keeps_raw_string() {
        let out = normalize(&Method::POST, None, &b"not json {"[..]);
        assert_eq!(out, Some(Value::String("not json {".to_string())));
    }

    #[test]
    fn test_stream_error_falls_back_to_empty_object() {
        let out = normalize(&Method::POST, None, BrokenStream);
        assert_eq!(out, Some(json!({})));
    }

    #[test]
    fn test_empty_stream_yields_no_body() {
        let out = normalize(&Method::POST, None, io::empty());
        assert_eq!(out, None);
    }
}
