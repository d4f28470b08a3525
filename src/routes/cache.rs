//! Process-wide route table cache.
//!
//! The table is read-mostly shared state. A build always runs to completion
//! and is published wholesale with an atomic swap, so concurrent readers
//! either see the previous complete table or the new complete table, never
//! a partially constructed one. No locks are involved because the table is
//! never mutated in place.

use super::build::{scan_routes_with, ScanConfig};
use super::types::RouteTable;
use crate::runtime_config::Mode;
use arc_swap::ArcSwapOption;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Owner of the cached route table and its rebuild policy.
///
/// In [`Mode::Development`] every call to [`table`](Self::table) performs a
/// fresh scan so newly added route files are visible immediately; redundant
/// concurrent scans are acceptable there. In [`Mode::Production`] the first
/// build is reused for the lifetime of the process.
pub struct RouteTableCache {
    root: PathBuf,
    mode: Mode,
    config: ScanConfig,
    table: ArcSwapOption<RouteTable>,
}

impl RouteTableCache {
    pub fn new(root: impl Into<PathBuf>, mode: Mode) -> Self {
        Self::with_config(root, mode, ScanConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, mode: Mode, config: ScanConfig) -> Self {
        Self {
            root: root.into(),
            mode,
            config,
            table: ArcSwapOption::const_empty(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Get the current route table, building it if the policy requires.
    pub fn table(&self) -> Arc<RouteTable> {
        if self.mode.is_development() {
            let fresh = Arc::new(scan_routes_with(&self.root, &self.config));
            self.table.store(Some(Arc::clone(&fresh)));
            return fresh;
        }

        if let Some(cached) = self.table.load_full() {
            return cached;
        }

        // Two racing first requests may both scan; each publishes a complete
        // table and the loser's work is simply discarded.
        debug!(root = %self.root.display(), "building route table");
        let built = Arc::new(scan_routes_with(&self.root, &self.config));
        self.table.store(Some(Arc::clone(&built)));
        built
    }
}
