use super::request::{parse_request, ParsedRequest};
use super::response::{write_handler_response, write_json_error};
use crate::dispatcher::{panic_message, DispatchError, Dispatcher, HandlerResponse, HeaderVec};
use crate::ids::RequestId;
use crate::router::{match_segments, CatchAllPath};
use crate::routes::RouteTableCache;
use crate::runtime_config::RuntimeConfig;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info};

/// The single physical HTTP entry point.
///
/// Every inbound call runs the same pipeline: parse and normalize the
/// request, obtain the route table from the cache, match the path, dispatch
/// to the registered handler, and convert every failure mode into one of
/// the structured JSON responses. The service writes to the wire exactly
/// once per request, after the outcome is known, so a handler failure can
/// never clobber a response that was already produced.
#[derive(Clone)]
pub struct AppService {
    pub routes: Arc<RouteTableCache>,
    pub dispatcher: Arc<Dispatcher>,
    pub config: RuntimeConfig,
}

impl AppService {
    pub fn new(
        routes: Arc<RouteTableCache>,
        dispatcher: Arc<Dispatcher>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            routes,
            dispatcher,
            config,
        }
    }

    /// Run one request through table lookup, matching and dispatch.
    ///
    /// Always produces a response; routing failures come back as the
    /// structured 404/500 shapes rather than errors.
    fn process(&self, request_id: RequestId, parsed: ParsedRequest) -> HandlerResponse {
        let ParsedRequest {
            method,
            path,
            headers,
            query_params,
            body,
        } = parsed;

        // Hosts deliver the wildcard remainder pre-split; a single-segment
        // path arrives as one bare value and is wrapped, never re-split.
        let mut split: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        let catch_all = if split.len() == 1 {
            CatchAllPath::Single(split.remove(0))
        } else {
            CatchAllPath::Segments(split)
        };
        let segments = catch_all.into_segments();

        let table = self.routes.table();
        if self.config.debug {
            table.dump();
            info!(request_id = %request_id, path_segments = ?segments, "incoming path");
        }

        let Some(route_match) = match_segments(&table, &segments) else {
            // An unmatched path is an ordinary outcome, not an error.
            return HandlerResponse::json(
                404,
                json!({
                    "error": "Not Found",
                    "path": segments.join("/"),
                    "routesCount": table.len(),
                }),
            );
        };

        if self.config.debug {
            info!(
                request_id = %request_id,
                pattern = %route_match.route.pattern,
                handler_key = %route_match.route.handler_key,
                "matched route"
            );
        }

        // Captured params are appended after the query string; lookups
        // resolve to the last occurrence, so params win key collisions.
        let mut query_params = query_params;
        for (name, value) in &route_match.params {
            query_params.push((Arc::clone(name), value.clone()));
        }

        match self.dispatcher.dispatch(
            route_match,
            method,
            path,
            body,
            query_params,
            headers,
            request_id,
        ) {
            Ok(response) => response,
            Err(DispatchError::ModuleLoad {
                handler_key,
                details,
            }) => {
                error!(
                    request_id = %request_id,
                    handler_key = %handler_key,
                    details = %details,
                    "handler module failed to load"
                );
                HandlerResponse::json(
                    500,
                    json!({
                        "error": "Internal Server Error",
                        "message": "Failed to load handler module",
                        "details": details,
                    }),
                )
            }
            Err(err @ DispatchError::InvalidHandler { .. }) => {
                error!(request_id = %request_id, error = %err, "invalid handler configuration");
                HandlerResponse::json(
                    500,
                    json!({
                        "error": "Internal Server Error",
                        "message": "Invalid handler configuration",
                    }),
                )
            }
            Err(DispatchError::HandlerFailed {
                handler_key,
                details,
            }) => {
                error!(request_id = %request_id, handler_key = %handler_key, "handler failed");
                HandlerResponse::json(
                    500,
                    json!({
                        "error": "Internal Server Error",
                        "message": details,
                    }),
                )
            }
        }
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_handler_response(res, 200, &HeaderVec::new(), json!({ "status": "ok" }));
    Ok(())
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        let request_id = RequestId::new();

        if parsed.method == http::Method::GET && parsed.path == "/health" {
            return health_endpoint(res);
        }

        // Top-level catch: a panic escaping any stage below must surface as
        // a structured 500, never a dropped connection or a raw backtrace.
        // Nothing has been written to the wire yet, so the single write
        // below cannot double-send.
        match catch_unwind(AssertUnwindSafe(|| self.process(request_id, parsed))) {
            Ok(response) => {
                write_handler_response(res, response.status, &response.headers, response.body);
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(request_id = %request_id, panic_message = %message, "request processing panicked");
                write_json_error(
                    res,
                    500,
                    json!({
                        "error": "Internal Server Error",
                        "message": message,
                    }),
                );
            }
        }
        Ok(())
    }
}
