//! Dispatcher core - hot path for request dispatch.

use crate::ids::RequestId;
use crate::router::{ParamVec, RouteMatch};
use crate::runtime_config;
use http::Method;
use may::coroutine;
use may::sync::mpsc;
use serde_json::Value;
use smallvec::SmallVec;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Maximum inline headers before heap allocation. Most requests carry
/// well under sixteen.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path. Header names repeat
/// across requests, so they are `Arc<str>`; values are per-request.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request data passed to a handler coroutine.
///
/// Captured path parameters are exposed twice on purpose: merged into
/// `query_params` (where they win key collisions against the query string)
/// and on their own `params` field for handlers that prefer explicit
/// access.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for log correlation.
    pub request_id: RequestId,
    /// HTTP method, passed through untouched from the wire.
    pub method: Method,
    /// Requested path as received.
    pub path: String,
    /// Registry key of the handler this request was routed to.
    pub handler_key: String,
    /// Parameters captured from the URL by the matcher.
    pub params: ParamVec,
    /// Query string parameters with captured params merged in; params take
    /// precedence on key collision.
    pub query_params: ParamVec,
    /// HTTP headers (lowercase names).
    pub headers: HeaderVec,
    /// Normalized request body, if any.
    pub body: Option<Value>,
    /// Channel for sending the response back to the dispatcher.
    pub reply_tx: mpsc::Sender<HandlerResponse>,
}

impl HandlerRequest {
    /// Get a captured path parameter by name.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name. Duplicate names resolve to the last
    /// occurrence, which is also how captured params override the query
    /// string.
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Convert params to a `HashMap`. Allocates; prefer
    /// [`get_param`](Self::get_param) on the hot path.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Convert query params to a `HashMap`. Allocates.
    #[must_use]
    pub fn query_params_map(&self) -> HashMap<String, String> {
        self.query_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Response data sent back from a handler coroutine.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code.
    pub status: u16,
    /// Extra response headers; content type is derived from the body.
    pub headers: HeaderVec,
    /// Response body. JSON values are serialized as `application/json`;
    /// a string body is sent as `text/plain`.
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with no extra headers.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body,
        }
    }

    /// Get a response header by name.
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Channel sender that delivers requests to a handler coroutine.
pub type HandlerSender = mpsc::Sender<HandlerRequest>;

/// Why a dispatch could not produce a handler response.
///
/// Each variant maps to one row of the router's error response table; the
/// conversion to a wire response happens in the service layer.
#[derive(Debug)]
pub enum DispatchError {
    /// No handler is registered for the route's handler key — the static
    /// equivalent of a handler module that fails to load.
    ModuleLoad {
        handler_key: String,
        details: String,
    },
    /// A registration exists but its entry point is no longer invocable
    /// (the handler coroutine is gone and its channel closed).
    InvalidHandler { handler_key: String },
    /// The handler accepted the request but never produced a response.
    HandlerFailed {
        handler_key: String,
        details: String,
    },
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::ModuleLoad {
                handler_key,
                details,
            } => write!(f, "failed to load handler {handler_key}: {details}"),
            DispatchError::InvalidHandler { handler_key } => {
                write!(f, "handler {handler_key} is not invocable")
            }
            DispatchError::HandlerFailed {
                handler_key,
                details,
            } => write!(f, "handler {handler_key} failed: {details}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Extract a printable message from a panic payload.
#[must_use]
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Dispatcher that routes matched requests to registered handler
/// coroutines.
///
/// The registry is populated once at process init (`registry::register_all`)
/// and read concurrently afterwards; each registered handler runs in its own
/// coroutine and receives requests over an mpsc channel.
#[derive(Clone, Default)]
pub struct Dispatcher {
    /// Map of handler keys (root-relative, extension-stripped route file
    /// paths) to their channel senders.
    pub handlers: HashMap<String, HandlerSender>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Dispatcher {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler function under the given key.
    ///
    /// Spawns a coroutine that drains the handler's channel. The handler is
    /// wrapped with panic recovery: a panicking handler answers its request
    /// with a 500 instead of killing the coroutine's queue.
    ///
    /// # Safety
    ///
    /// `may::coroutine::Builder::spawn` is unsafe in the `may` runtime; the
    /// caller must ensure the runtime is initialized before registering and
    /// that handlers send at most one reply per request.
    pub unsafe fn register_handler<F>(&mut self, key: &str, handler_fn: F)
    where
        F: Fn(HandlerRequest) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<HandlerRequest>();
        let key = key.to_string();
        let key_for_logging = key.clone();

        let stack_size = std::env::var("SHOPATLAS_STACK_SIZE")
            .ok()
            .and_then(|v| runtime_config::parse_stack_size(&v))
            .unwrap_or(runtime_config::DEFAULT_STACK_SIZE);

        // SAFETY: spawn is unsafe because of the coroutine runtime's own
        // requirements, not this function's logic. The closure is Send +
        // 'static and reports failures over the reply channel.
        let spawn_result = unsafe {
            coroutine::Builder::new()
                .stack_size(stack_size)
                .spawn(move || {
                    debug!(handler_key = %key_for_logging, stack_size, "handler coroutine start");

                    for req in rx.iter() {
                        let reply_tx = req.reply_tx.clone();
                        let handler_key = req.handler_key.clone();
                        let request_id = req.request_id;
                        let start = Instant::now();

                        if let Err(panic) =
                            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                                handler_fn(req);
                            }))
                        {
                            let message = panic_message(panic.as_ref());
                            error!(
                                request_id = %request_id,
                                handler_key = %handler_key,
                                panic_message = %message,
                                "handler panicked"
                            );
                            // If the handler already replied, its response is
                            // first in the channel and this one is discarded.
                            let _ = reply_tx.send(HandlerResponse::json(
                                500,
                                serde_json::json!({
                                    "error": "Internal Server Error",
                                    "message": message,
                                }),
                            ));
                        } else {
                            debug!(
                                request_id = %request_id,
                                handler_key = %handler_key,
                                execution_time_ms = start.elapsed().as_millis() as u64,
                                "handler execution complete"
                            );
                        }
                    }
                })
        };

        if let Err(err) = spawn_result {
            error!(handler_key = %key, error = %err, stack_size, "failed to spawn handler coroutine");
            return;
        }

        self.handlers.insert(key, tx);
    }

    /// Dispatch a matched request to its handler and wait for the reply.
    ///
    /// The handler owns its response; the dispatcher passes it back without
    /// inspecting or altering it, and waits without a timeout — an
    /// unresponsive handler holds its own request open without affecting
    /// concurrent requests.
    pub fn dispatch(
        &self,
        route_match: RouteMatch,
        method: Method,
        path: String,
        body: Option<Value>,
        query_params: ParamVec,
        headers: HeaderVec,
        request_id: RequestId,
    ) -> Result<HandlerResponse, DispatchError> {
        let handler_key = route_match.route.handler_key.clone();

        debug!(
            handler_key = %handler_key,
            available_handlers = self.handlers.len(),
            "handler lookup"
        );

        let tx = self
            .handlers
            .get(&handler_key)
            .ok_or_else(|| DispatchError::ModuleLoad {
                handler_key: handler_key.clone(),
                details: format!(
                    "no handler registered for route file {}",
                    route_match.route.file_path.display()
                ),
            })?;

        let (reply_tx, reply_rx) = mpsc::channel();
        let request = HandlerRequest {
            request_id,
            method,
            path,
            handler_key: handler_key.clone(),
            params: route_match.params,
            query_params,
            headers,
            body,
            reply_tx,
        };

        info!(
            request_id = %request_id,
            handler_key = %handler_key,
            method = %request.method,
            path = %request.path,
            "request dispatched to handler"
        );

        let start = Instant::now();
        if tx.send(request).is_err() {
            error!(
                request_id = %request_id,
                handler_key = %handler_key,
                "handler channel closed, registration is no longer invocable"
            );
            return Err(DispatchError::InvalidHandler { handler_key });
        }

        match reply_rx.recv() {
            Ok(response) => {
                info!(
                    request_id = %request_id,
                    handler_key = %handler_key,
                    status = response.status,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "handler response received"
                );
                Ok(response)
            }
            Err(err) => {
                error!(
                    request_id = %request_id,
                    handler_key = %handler_key,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %err,
                    "handler dropped the reply channel without responding"
                );
                Err(DispatchError::HandlerFailed {
                    handler_key,
                    details: "handler did not produce a response".to_string(),
                })
            }
        }
    }
}
