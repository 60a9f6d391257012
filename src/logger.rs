//! The logging handle polygons report through.
//!
//! Geometry problems are never fatal: a malformed polygon degrades to fewer
//! (or zero) triangles and says so through a [`Logger`]. Every polygon holds
//! one, so there is always somewhere for a warning to go.
//!
//! By default messages are forwarded to the [`log`] facade under the
//! `citymesh` target, which means any `log` backend picks them up:
//!
//! ```sh
//! $> RUST_LOG=citymesh=warn cargo run
//! ```

use log::Level;
use std::fmt::Debug;
use std::sync::Arc;

/// Target used for every record emitted through [`LogFacade`].
pub const LOG_TARGET: &str = "citymesh";

/// A leveled, append-only message sink.
///
/// Implementations must not panic and must tolerate being shared between
/// many polygons (and threads).
pub trait Logger: Send + Sync + Debug {
    fn log(&self, level: Level, message: &str);

    /// Whether a message at `level` would be recorded at all.
    /// Lets callers skip formatting expensive messages.
    fn is_enabled(&self, _level: Level) -> bool {
        true
    }
}

/// Forwards to the [`log`] crate macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }

    fn is_enabled(&self, level: Level) -> bool {
        log::log_enabled!(target: LOG_TARGET, level)
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {}

    fn is_enabled(&self, _level: Level) -> bool {
        false
    }
}

/// The handle type shared between a factory and its polygons.
pub type SharedLogger = Arc<dyn Logger>;

/// A [`LogFacade`] behind the shared handle type.
pub fn default_logger() -> SharedLogger {
    Arc::new(LogFacade)
}
