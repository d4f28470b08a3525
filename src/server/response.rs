use crate::dispatcher::HeaderVec;
use may_minihttp::Response;
use serde_json::Value;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a handler's response to the wire.
///
/// Extra headers from the handler are emitted first; unless the handler set
/// its own `Content-Type`, one is derived from the body (`text/plain` for a
/// string, `application/json` otherwise).
pub fn write_handler_response(res: &mut Response, status: u16, headers: &HeaderVec, body: Value) {
    res.status_code(status as usize, status_reason(status));

    let mut has_content_type = false;
    for (name, value) in headers {
        if name.eq_ignore_ascii_case("content-type") {
            has_content_type = true;
        }
        // may_minihttp takes fully formed 'static header lines.
        let line = format!("{name}: {value}").into_boxed_str();
        res.header(Box::leak(line));
    }

    match body {
        Value::String(s) => {
            if !has_content_type {
                res.header("Content-Type: text/plain");
            }
            res.body_vec(s.into_bytes());
        }
        other => {
            if !has_content_type {
                res.header("Content-Type: application/json");
            }
            res.body_vec(other.to_string().into_bytes());
        }
    }
}

/// Write a router-originated JSON error response.
pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(500), "Internal Server Error");
    }
}
