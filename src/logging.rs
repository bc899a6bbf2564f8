//! Logging setup and the scoped context handed to engine components.
//!
//! The `log` facade is the only global; every component that logs receives a
//! [`LogContext`] at construction and tags its records with that scope.

use std::fmt;

use log::LevelFilter;

/// Log target used for every record emitted by the engine.
pub const TARGET: &str = "trackgen";

/// Scope attached to log records from one component (the driver, a missile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    scope: String,
}

impl LogContext {
    pub fn new(scope: impl Into<String>) -> Self {
        Self { scope: scope.into() }
    }

    /// Nested scope, e.g. `sim` -> `sim/missile_1`.
    pub fn child(&self, name: impl fmt::Display) -> Self {
        Self { scope: format!("{}/{}", self.scope, name) }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        log::info!(target: TARGET, "[{}] {}", self.scope, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: TARGET, "[{}] {}", self.scope, args);
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        log::trace!(target: TARGET, "[{}] {}", self.scope, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        log::error!(target: TARGET, "[{}] {}", self.scope, args);
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(TARGET)
    }
}

/// Install `env_logger` for the process: info by default, debug when
/// `verbose`. `RUST_LOG` takes precedence over both.
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_scopes_nest() {
        let root = LogContext::new("sim");
        let child = root.child("missile_1");
        assert_eq!(child.scope(), "sim/missile_1");
        assert_eq!(root.scope(), "sim");
    }

    #[test]
    fn logging_without_a_logger_is_harmless() {
        let ctx = LogContext::default();
        ctx.debug(format_args!("value = {}", 42));
        ctx.info(format_args!("done"));
    }
}
