#![allow(dead_code)]

pub mod route_tree {
    use std::fs;
    use std::path::Path;

    /// Write a route tree fixture. Each entry is a root-relative file path
    /// using `/` separators; parent directories are created as needed. The
    /// scanner never reads file contents, so a stub object is enough.
    pub fn write(root: &Path, files: &[&str]) {
        for rel in files {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, "{}").unwrap();
        }
    }
}

pub mod test_server {
    use once_cell::sync::Lazy;

    /// Ensures May coroutines and test tracing are configured only once.
    static INIT: Lazy<()> = Lazy::new(|| {
        may::config().set_stack_size(0x8000);
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });

    pub fn setup_may_runtime() {
        Lazy::force(&INIT);
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Send one raw HTTP/1.1 request and return `(status, body)`.
    ///
    /// Asks the server to close the connection; the short read timeout
    /// bounds the test if it keeps it open anyway.
    pub fn send_request(
        addr: SocketAddr,
        method: &str,
        path: &str,
        body: Option<&str>,
    ) -> (u16, String) {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();

        let body = body.unwrap_or("");
        let request = format!(
            "{method} {path} HTTP/1.1\r\n\
             Host: localhost\r\n\
             Connection: close\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(request.as_bytes()).unwrap();

        let mut raw = Vec::new();
        // A timeout is fine here; whatever arrived is in the buffer.
        let _ = stream.read_to_end(&mut raw);
        let text = String::from_utf8_lossy(&raw).into_owned();

        let status = text
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|code| code.parse().ok())
            .unwrap_or_else(|| panic!("malformed response: {text:?}"));
        let body = text
            .split_once("\r\n\r\n")
            .map(|(_, b)| b.to_string())
            .unwrap_or_default();
        (status, body)
    }

    /// Send a request and parse the response body as JSON.
    pub fn send_json_request(
        addr: SocketAddr,
        method: &str,
        path: &str,
        body: Option<&str>,
    ) -> (u16, serde_json::Value) {
        let (status, body) = send_request(addr, method, path, body);
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|err| panic!("non-JSON response body {body:?}: {err}"));
        (status, json)
    }
}
