//! # ShopAtlas
//!
//! **ShopAtlas** is the request-routing core of a map-centric shop
//! directory API, built on the `may` coroutine runtime. The deployment
//! platform bills per physical function, so the service exposes exactly
//! one HTTP entry point and folds every logical endpoint into it: a route
//! directory tree is scanned into a prioritized table, incoming paths are
//! matched against it, and requests are dispatched to statically
//! registered handler functions.
//!
//! ## Architecture
//!
//! - **[`routes`]** - Route discovery: the directory scan, the
//!   specificity-sorted table, and the process-wide cache that rebuilds
//!   per call in development mode and builds once in production
//! - **[`router`]** - Path matching: priority-order scan with an exact
//!   segment-count filter, literal equality and `:name` capture
//! - **[`body`]** - Body normalization: JSON, raw-string and empty-object
//!   fallbacks; never fails
//! - **[`dispatcher`]** - Coroutine-based handler dispatch over mpsc
//!   channels, with panic recovery
//! - **[`server`]** - The catch-all `AppService` on `may_minihttp`, plus
//!   request/response plumbing and the `HttpServer` wrapper
//! - **[`handlers`]** / **[`registry`]** - The shop directory surface and
//!   its handler registrations
//!
//! ## Request Handling Flow
//!
//! ```text
//! HTTP request
//!   → parse + normalize body          (server::request, body)
//!   → route table from cache          (routes::RouteTableCache)
//!   → match path segments             (router::match_segments)
//!   → dispatch to handler coroutine   (dispatcher::Dispatcher)
//!   → write response                  (server::response)
//! ```
//!
//! Every failure mode on that path is converted to a structured JSON
//! response: unmatched paths get a 404 with the route count, a missing
//! registration or a dead handler channel get the two distinguished 500
//! shapes, and anything escaping the pipeline is caught at the top level.
//!
//! ## Quick Start
//!
//! ```no_run
//! use shopatlas::dispatcher::Dispatcher;
//! use shopatlas::routes::RouteTableCache;
//! use shopatlas::runtime_config::RuntimeConfig;
//! use shopatlas::server::{AppService, HttpServer};
//! use std::sync::Arc;
//!
//! let config = RuntimeConfig::from_env();
//! let routes = Arc::new(RouteTableCache::new("routes", config.mode));
//! let mut dispatcher = Dispatcher::new();
//! unsafe {
//!     shopatlas::registry::register_all(&mut dispatcher);
//! }
//! let service = AppService::new(routes, Arc::new(dispatcher), config);
//! let handle = HttpServer(service).start("0.0.0.0:8080").expect("bind");
//! let _ = handle.join();
//! ```
//!
//! ## Runtime Considerations
//!
//! ShopAtlas uses the `may` coroutine runtime, not tokio. Handlers run in
//! coroutines fed over channels; the stack size is configurable via the
//! `SHOPATLAS_STACK_SIZE` environment variable. The dispatcher awaits a
//! handler's reply without a timeout - an unresponsive handler holds its
//! own request open without affecting concurrent requests.

pub mod body;
pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod registry;
pub mod router;
pub mod routes;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{DispatchError, Dispatcher, HandlerRequest, HandlerResponse};
pub use ids::RequestId;
pub use router::{match_segments, CatchAllPath, RouteMatch};
pub use routes::{scan_routes, RouteDescriptor, RouteTable, RouteTableCache};
pub use runtime_config::{Mode, RuntimeConfig};
