//! Route table construction from a directory tree.
//!
//! The route directory is the source of truth for the URL surface: every
//! eligible file becomes exactly one route, with its pattern derived from
//! the file's name and position. `index` files map to their directory's
//! prefix, `[name]` files become `:name` parameter segments, anything else
//! is a literal segment.

use super::types::{RouteDescriptor, RouteTable};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// File stem treated as shared helper code rather than a route.
pub const HELPER_FILE_STEM: &str = "_utils";
/// Directory name whose subtree holds internal helpers, never routes.
pub const HELPER_DIR_SEGMENT: &str = "_lib";

/// Which files and directories the scanner skips.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub helper_file_stem: String,
    pub helper_dir_segment: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            helper_file_stem: HELPER_FILE_STEM.to_string(),
            helper_dir_segment: HELPER_DIR_SEGMENT.to_string(),
        }
    }
}

/// Scan `root` and build a priority-ordered route table with the default
/// skip rules.
#[must_use]
pub fn scan_routes(root: &Path) -> RouteTable {
    scan_routes_with(root, &ScanConfig::default())
}

/// Scan `root` with explicit skip rules.
///
/// An unreadable directory is logged and skipped; its siblings are still
/// scanned and the build always completes. An unreadable (or missing) root
/// therefore yields an empty table, not an error.
#[must_use]
pub fn scan_routes_with(root: &Path, config: &ScanConfig) -> RouteTable {
    let mut found = Vec::new();
    collect(root, "", config, &mut found);
    RouteTable::new(found)
}

fn collect(dir: &Path, prefix: &str, config: &ScanConfig, out: &mut Vec<RouteDescriptor>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "skipping unreadable route directory");
            return;
        }
    };

    // Fix the traversal order so the built table does not depend on how
    // the OS happens to order directory entries.
    let mut entries: Vec<_> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_dir() {
            if name == config.helper_dir_segment {
                debug!(dir = %path.display(), "skipping helper directory");
                continue;
            }
            collect(&path, &format!("{prefix}/{name}"), config, out);
        } else {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(name);
            if stem == config.helper_file_stem {
                debug!(file = %path.display(), "skipping helper file");
                continue;
            }

            let pattern = pattern_for(prefix, &stem);
            let handler_key = if prefix.is_empty() {
                stem
            } else {
                format!("{}/{}", prefix.trim_start_matches('/'), stem)
            };
            let segments = pattern
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();

            out.push(RouteDescriptor {
                pattern,
                file_path: path,
                handler_key,
                segments,
            });
        }
    }
}

/// Derive a route pattern from a URL prefix and a route file stem.
///
/// Prefixes are accumulated with `/` during the walk, so patterns come out
/// `/`-delimited on every OS.
fn pattern_for(prefix: &str, stem: &str) -> String {
    if stem == "index" {
        if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.to_string()
        }
    } else if let Some(param) = stem.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        format!("{prefix}/:{param}")
    } else {
        format!("{prefix}/{stem}")
    }
}
