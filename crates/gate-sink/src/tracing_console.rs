//! crates/gate-sink/src/tracing_console.rs
//! Host console that forwards gated output into `tracing` events.
//!
//! Lets a gate decorate an application that already logs through `tracing`:
//! messages that pass the gate become events under the `condcon` target and
//! are filtered and formatted by whatever subscriber is installed.
//!
//! ```rust,ignore
//! use gate_sink::TracingConsole;
//!
//! tracing_subscriber::fmt::init();
//! let console = TracingConsole::new();
//! console.call(ConsoleMethod::Warn, format_args!("disk almost full"));
//! ```

use std::fmt;

use crate::host::HostConsole;
use crate::method::ConsoleMethod;

/// Host console backed by the `tracing` macros.
///
/// | Method            | Event      |
/// |-------------------|------------|
/// | `error`           | `error!`   |
/// | `warn`            | `warn!`    |
/// | `info`, `log`     | `info!`    |
/// | `debug`, `dir`    | `debug!`   |
/// | `trace`           | `trace!`   |
///
/// Every other method is unsupported.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingConsole;

impl TracingConsole {
    /// Creates the console.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HostConsole for TracingConsole {
    fn supports(&self, method: ConsoleMethod) -> bool {
        matches!(
            method,
            ConsoleMethod::Error
                | ConsoleMethod::Warn
                | ConsoleMethod::Info
                | ConsoleMethod::Log
                | ConsoleMethod::Debug
                | ConsoleMethod::Dir
                | ConsoleMethod::Trace
        )
    }

    fn call(&self, method: ConsoleMethod, args: fmt::Arguments<'_>) {
        match method {
            ConsoleMethod::Error => tracing::error!(target: "condcon", "{}", args),
            ConsoleMethod::Warn => tracing::warn!(target: "condcon", "{}", args),
            ConsoleMethod::Info | ConsoleMethod::Log => {
                tracing::info!(target: "condcon", "{}", args);
            }
            ConsoleMethod::Debug | ConsoleMethod::Dir => {
                tracing::debug!(target: "condcon", "{}", args);
            }
            ConsoleMethod::Trace => tracing::trace!(target: "condcon", "{}", args),
            _ => {}
        }
    }
}
