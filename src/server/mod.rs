//! # Server Module
//!
//! The single physical HTTP entry point and its plumbing: request parsing,
//! the catch-all [`AppService`] that orchestrates table lookup, matching
//! and dispatch, response writing, and a typed [`HttpServer`] wrapper
//! around `may_minihttp`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use response::{write_handler_response, write_json_error};
pub use service::{health_endpoint, AppService};
