#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Live HTTP round-trips through the catch-all entry point: routing,
//! parameter merge, and every router-originated response shape.

mod common;

use common::http::send_json_request;
use common::route_tree;
use common::test_server::setup_may_runtime;
use serde_json::json;
use shopatlas::dispatcher::{Dispatcher, HandlerResponse};
use shopatlas::routes::{scan_routes, RouteTableCache};
use shopatlas::runtime_config::{Mode, RuntimeConfig, DEFAULT_STACK_SIZE};
use shopatlas::server::{AppService, HttpServer, ServerHandle};
use std::fs;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use tempfile::TempDir;

const ROUTE_FILES: &[&str] = &[
    "index.json",
    "search.json",
    "shops/index.json",
    "shops/featured.json",
    "shops/[id].json",
    "shops/_utils.json",
    "_lib/geo.json",
    "categories/index.json",
    "categories/[slug].json",
    // Failure-mode fixtures: a route file with no registration, one whose
    // handler channel is closed, and one whose handler never replies.
    "orphan.json",
    "broken.json",
    "hollow.json",
];

/// Test fixture with automatic teardown: a full server on an ephemeral
/// port over a temporary route tree.
struct TestServer {
    addr: SocketAddr,
    handle: Option<ServerHandle>,
    dir: TempDir,
}

impl TestServer {
    fn start(mode: Mode) -> Self {
        setup_may_runtime();

        let dir = tempfile::tempdir().unwrap();
        route_tree::write(dir.path(), ROUTE_FILES);

        let routes = Arc::new(RouteTableCache::new(dir.path(), mode));
        let mut dispatcher = Dispatcher::new();
        unsafe {
            shopatlas::registry::register_all(&mut dispatcher);
            dispatcher.register_handler("hollow", |req| {
                drop(req);
            });
            // Registered ahead of time; its route file only appears in the
            // development-mode test.
            dispatcher.register_handler("late", |req| {
                let _ = req
                    .reply_tx
                    .send(HandlerResponse::json(200, json!({ "late": true })));
            });
        }
        let (tx, rx) = may::sync::mpsc::channel();
        drop(rx);
        dispatcher.handlers.insert("broken".to_string(), tx);

        let config = RuntimeConfig {
            mode,
            debug: false,
            stack_size: DEFAULT_STACK_SIZE,
        };
        let service = AppService::new(routes, Arc::new(dispatcher), config);

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let handle = HttpServer(service).start(addr).unwrap();
        handle.wait_ready().unwrap();

        Self {
            addr,
            handle: Some(handle),
            dir,
        }
    }

    fn get(&self, path: &str) -> (u16, serde_json::Value) {
        send_json_request(self.addr, "GET", path, None)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
    }
}

#[test]
fn test_health_endpoint() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = server.get("/health");
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[test]
fn test_root_index_lists_endpoints() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = server.get("/");
    assert_eq!(status, 200);
    assert_eq!(body["service"], "shopatlas");
}

#[test]
fn test_literal_route_beats_param_route() {
    let server = TestServer::start(Mode::Production);

    let (status, body) = server.get("/shops/featured");
    assert_eq!(status, 200);
    assert!(body["items"].as_array().unwrap().iter().all(|shop| shop["featured"] == true));

    let (status, body) = server.get("/shops/2");
    assert_eq!(status, 200);
    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "Beanery");
}

#[test]
fn test_captured_param_wins_over_query_param() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = server.get("/shops/2?id=999");
    assert_eq!(status, 200);
    assert_eq!(body["id"], 2);
}

#[test]
fn test_query_params_reach_the_handler() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = server.get("/shops?category=coffee");
    assert_eq!(status, 200);
    let items = body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|shop| shop["category"] == "coffee"));
}

#[test]
fn test_post_body_reaches_the_handler() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = send_json_request(
        server.addr,
        "POST",
        "/shops",
        Some(r#"{"name":"New Deli","category":"food","lat":52.51,"lng":13.41}"#),
    );
    assert_eq!(status, 201);
    assert_eq!(body["name"], "New Deli");
    assert_eq!(body["category"], "food");
}

#[test]
fn test_malformed_json_body_reaches_handler_as_raw_string() {
    let server = TestServer::start(Mode::Production);
    // The normalizer keeps the raw string as the body; the shops handler
    // rejects it as a 400 instead of the pipeline throwing.
    let (status, body) =
        send_json_request(server.addr, "POST", "/shops", Some("name=NewDeli&lat=52.51"));
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Bad Request");
}

#[test]
fn test_method_is_passed_through_untouched() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = send_json_request(server.addr, "PUT", "/shops", Some("{}"));
    assert_eq!(status, 405);
    assert_eq!(body["method"], "PUT");
}

#[test]
fn test_not_found_carries_path_and_routes_count() {
    let server = TestServer::start(Mode::Production);
    let expected_routes = scan_routes(server.dir.path()).len();

    let (status, body) = server.get("/nope/deep");
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], "nope/deep");
    assert_eq!(body["routesCount"], expected_routes);
}

#[test]
fn test_unregistered_route_file_is_module_load_500() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = server.get("/orphan");
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "Failed to load handler module");
    assert!(body["details"].as_str().unwrap().contains("orphan.json"));
}

#[test]
fn test_dead_handler_channel_is_invalid_configuration_500() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = server.get("/broken");
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "Invalid handler configuration");
    assert!(body.get("details").is_none());
}

#[test]
fn test_handler_without_reply_is_generic_500() {
    let server = TestServer::start(Mode::Production);
    let (status, body) = server.get("/hollow");
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "handler did not produce a response");
}

#[test]
fn test_development_mode_picks_up_new_route_files() {
    let server = TestServer::start(Mode::Development);

    let (status, _) = server.get("/late");
    assert_eq!(status, 404);

    fs::write(server.dir.path().join("late.json"), "{}").unwrap();
    let (status, body) = server.get("/late");
    assert_eq!(status, 200);
    assert_eq!(body["late"], true);
}

#[test]
fn test_production_mode_caches_the_first_table() {
    let server = TestServer::start(Mode::Production);

    let (status, _) = server.get("/late");
    assert_eq!(status, 404);

    // The table was built (and cached) by the request above; a file added
    // afterwards stays invisible until restart.
    fs::write(server.dir.path().join("late.json"), "{}").unwrap();
    let (status, _) = server.get("/late");
    assert_eq!(status, 404);
}
