//! Handler registry.
//!
//! The statically compiled counterpart of the route directory: every route
//! file under `routes/` has a registration here, keyed by the file's
//! root-relative path with the extension stripped. The scan discovers the
//! routes at runtime; this map resolves them to code.

use crate::dispatcher::Dispatcher;
use crate::handlers;

/// Register every shop directory handler.
///
/// # Safety
///
/// Spawns handler coroutines; see [`Dispatcher::register_handler`].
pub unsafe fn register_all(dispatcher: &mut Dispatcher) {
    dispatcher.register_handler("index", handlers::root::handler);
    dispatcher.register_handler("search", handlers::search::handler);
    dispatcher.register_handler("categories/index", handlers::categories::handler);
    dispatcher.register_handler("categories/[slug]", handlers::category_detail::handler);
    dispatcher.register_handler("shops/index", handlers::shops::handler);
    dispatcher.register_handler("shops/featured", handlers::featured::handler);
    dispatcher.register_handler("shops/[id]", handlers::shop_detail::handler);
}
