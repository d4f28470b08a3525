//! # Dispatcher Module
//!
//! Coroutine-based handler dispatch. The dispatcher holds the registration
//! map from handler keys to channel senders — the statically compiled
//! replacement for importing a handler module by file path at request time.
//!
//! ## Request Flow
//!
//! 1. The matcher resolves an incoming path to a route and its handler key
//! 2. The dispatcher looks the key up in the registry
//! 3. The request is sent to the handler coroutine via its channel
//! 4. The handler processes the request and replies on a one-shot channel
//! 5. The reply travels back to the service layer unmodified
//!
//! ## Error Handling
//!
//! A missing registration, a closed handler channel and a dropped reply
//! channel are distinguished as [`DispatchError`] variants so the service
//! can emit the matching structured 500 response. Handler panics are caught
//! inside the coroutine and answered with a 500; they never take the server
//! down.

mod core;

pub use core::{
    panic_message, DispatchError, Dispatcher, HandlerRequest, HandlerResponse, HandlerSender,
    HeaderVec, MAX_INLINE_HEADERS,
};
