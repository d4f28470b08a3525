//! Path matching - hot path for request routing.

use crate::routes::{RouteDescriptor, RouteTable};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of path/query parameters before heap allocation.
/// Route files nest shallowly, so captured params almost always fit.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` so repeated lookups clone a pointer rather
/// than copying the string; values are per-request data and stay `String`.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path against the route table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (shared with the table, no deep clone).
    pub route: Arc<RouteDescriptor>,
    /// Values captured by `:name` segments, in pattern order. Keys are
    /// unique: a pattern cannot bind the same name twice at equal depth.
    pub params: ParamVec,
}

impl RouteMatch {
    /// Get a captured parameter by name.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert params to a `HashMap`. This allocates; prefer
    /// [`get_param`](Self::get_param) on the hot path.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// The host-supplied trailing path of a catch-all invocation.
///
/// Platforms deliver the wildcard remainder either as a pre-split sequence
/// of segments or, for single-segment paths, as one bare value. A bare
/// value is wrapped into a one-element sequence, never re-split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchAllPath {
    Single(String),
    Segments(Vec<String>),
}

impl CatchAllPath {
    #[must_use]
    pub fn into_segments(self) -> Vec<String> {
        match self {
            CatchAllPath::Single(value) => vec![value],
            CatchAllPath::Segments(segments) => segments,
        }
    }
}

impl From<String> for CatchAllPath {
    fn from(value: String) -> Self {
        CatchAllPath::Single(value)
    }
}

impl From<Vec<String>> for CatchAllPath {
    fn from(segments: Vec<String>) -> Self {
        CatchAllPath::Segments(segments)
    }
}

/// Match a pre-split request path against the table.
///
/// Candidates are tried in stored priority order. A candidate with a
/// different segment count is skipped outright; for the rest, literal
/// segments must compare equal (case-sensitive, no normalization) and
/// `:name` segments capture the corresponding path segment. The first
/// fully paired candidate wins and no further candidates are examined —
/// the table's specificity ordering is what makes this greedy policy
/// prefer the most specific equal-length route.
///
/// Returns `None` when nothing matches; that is an ordinary outcome, not
/// an error.
#[must_use]
pub fn match_segments(table: &RouteTable, segments: &[String]) -> Option<RouteMatch> {
    debug!(path_segments = ?segments, routes_count = table.len(), "route match attempt");

    for route in table.iter() {
        if route.segments.len() != segments.len() {
            continue;
        }

        let mut params = ParamVec::new();
        let mut matched = true;
        for (candidate, actual) in route.segments.iter().zip(segments) {
            if let Some(name) = candidate.strip_prefix(':') {
                params.push((Arc::from(name), actual.clone()));
            } else if candidate != actual {
                matched = false;
                break;
            }
        }

        if matched {
            debug!(
                pattern = %route.pattern,
                handler_key = %route.handler_key,
                params = ?params,
                "route matched"
            );
            return Some(RouteMatch {
                route: Arc::clone(route),
                params,
            });
        }
    }

    debug!(path_segments = ?segments, "no route matched");
    None
}
