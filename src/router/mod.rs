//! # Router Module
//!
//! Path matching against the discovered route table.
//!
//! Matching is a linear scan in table priority order with an exact
//! segment-count filter: routes of a different length are never in
//! competition for a request, and among equal-length candidates the table's
//! specificity ordering means the first full pairing is also the most
//! specific one. Literal segments compare exactly; `:name` segments always
//! match and capture the path segment's value.
//!
//! There is no backtracking and no scoring of partial matches. When two
//! equal-length parameter routes could both match a path, table order alone
//! (literal count, then pattern) decides the winner.

mod core;

pub use core::{match_segments, CatchAllPath, ParamVec, RouteMatch, MAX_INLINE_PARAMS};
