//! Environment-based runtime configuration.
//!
//! Three knobs control the router's runtime behavior:
//!
//! - `SHOPATLAS_MODE` — `development` rebuilds the route table on every
//!   inbound call so newly added route files are picked up without a
//!   restart; any other value (or unset) builds the table once and caches
//!   it for the lifetime of the process.
//! - `SHOPATLAS_DEBUG` — enables verbose diagnostics (route table dump,
//!   per-request match logging). Observability only; it never changes how
//!   a request is routed.
//! - `SHOPATLAS_STACK_SIZE` — stack size for handler coroutines, decimal
//!   (`65536`) or hex (`0x10000`). Default 64 KB.

use std::env;

/// Route table lifecycle mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rebuild the route table on every inbound call.
    Development,
    /// Build the route table once and reuse it for the process lifetime.
    Production,
}

impl Mode {
    #[must_use]
    pub fn is_development(self) -> bool {
        matches!(self, Mode::Development)
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Mode::Development,
            _ => Mode::Production,
        }
    }
}

/// Default coroutine stack size in bytes (64 KB).
pub const DEFAULT_STACK_SIZE: usize = 0x10000;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup with [`RuntimeConfig::from_env()`]; the CLI may
/// override individual fields afterwards.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    pub mode: Mode,
    /// Verbose diagnostic logging. Never influences control flow.
    pub debug: bool,
    /// Stack size for handler coroutines in bytes.
    pub stack_size: usize,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let mode = env::var("SHOPATLAS_MODE")
            .map(|v| Mode::from(v.as_str()))
            .unwrap_or(Mode::Production);
        let debug = env::var("SHOPATLAS_DEBUG")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let stack_size = env::var("SHOPATLAS_STACK_SIZE")
            .ok()
            .and_then(|v| parse_stack_size(&v))
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig {
            mode,
            debug,
            stack_size,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            mode: Mode::Production,
            debug: false,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

/// Parse a stack size given in decimal or `0x` hex notation.
pub(crate) fn parse_stack_size(value: &str) -> Option<usize> {
    if let Some(hex) = value.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}
