//! # Routes Module
//!
//! Route discovery and the route table. The route directory tree is the
//! single source of truth for the URL surface:
//!
//! 1. **Scan**: the directory is walked recursively; each eligible file
//!    yields one [`RouteDescriptor`] whose pattern is derived from the
//!    file's name (`index` → directory prefix, `[name]` → `:name`
//!    parameter, anything else → literal segment).
//! 2. **Sort**: descriptors are ordered by specificity (literal segment
//!    count, then length, then pattern) so the matcher's first-match scan
//!    prefers the most specific candidate.
//! 3. **Publish**: [`RouteTableCache`] owns the shared table and swaps it
//!    atomically — rebuilt per call in development mode, built once in
//!    production.
//!
//! Scanning failures are contained: an unreadable subtree is logged and
//! skipped while its siblings are still scanned.

mod build;
mod cache;
mod types;

pub use build::{scan_routes, scan_routes_with, ScanConfig, HELPER_DIR_SEGMENT, HELPER_FILE_STEM};
pub use cache::RouteTableCache;
pub use types::{RouteDescriptor, RouteTable};
