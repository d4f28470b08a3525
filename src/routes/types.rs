use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A single route discovered from the route directory.
///
/// Exactly one descriptor exists per eligible route file. Descriptors are
/// immutable once built; rebuilding the table produces a fresh set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// `/`-delimited URL template, e.g. `/shops/:id`.
    pub pattern: String,
    /// On-disk path of the backing route file.
    pub file_path: PathBuf,
    /// Registry key for the handler backing this route: the route file's
    /// root-relative path with the extension stripped, e.g. `shops/[id]`.
    pub handler_key: String,
    /// `pattern` split on `/` with empty pieces discarded. A segment
    /// starting with `:` is a named parameter; all others are literal.
    pub segments: Vec<String>,
}

impl RouteDescriptor {
    /// Number of literal (non-parameter) segments. Higher counts sort
    /// earlier among candidates of equal length, so more specific routes
    /// win the first-match scan.
    #[must_use]
    pub fn literal_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.starts_with(':')).count()
    }
}

/// An immutable, priority-ordered set of route descriptors.
///
/// Ordering: literal segment count descending, then total segment count
/// descending, then pattern ascending as a deterministic tie-break. The
/// matcher hard-filters on segment count, so the ordering between routes
/// of different lengths never affects a match outcome; it only keeps the
/// table stable for diagnostics.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Arc<RouteDescriptor>>,
}

impl RouteTable {
    #[must_use]
    pub fn new(mut routes: Vec<RouteDescriptor>) -> Self {
        routes.sort_by(|a, b| {
            b.literal_segment_count()
                .cmp(&a.literal_segment_count())
                .then_with(|| b.segments.len().cmp(&a.segments.len()))
                .then_with(|| a.pattern.cmp(&b.pattern))
        });
        debug!(routes_count = routes.len(), "route table built");
        Self {
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteDescriptor>> {
        self.routes.iter()
    }

    /// Print the table in priority order. Useful at startup and when the
    /// debug flag is set to verify which route files were discovered.
    pub fn dump(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!("[route] {} -> {}", route.pattern, route.handler_key);
        }
    }
}
