#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/gate-sink/src/lib.rs
//!
//! # Overview
//!
//! `gate-sink` is the host side of a conditional logging gate. A gate
//! forwards the output calls that pass its conditions to a [`HostConsole`];
//! this crate defines that trait, the fixed [`ConsoleMethod`] list a gate
//! binds, and three hosts:
//!
//! - [`WriterConsole`] renders lines into a pair of [`std::io::Write`]
//!   targets ([`StdConsole`] uses the process's stdout and stderr).
//! - [`MemoryConsole`] records calls for inspection in tests.
//! - [`TracingConsole`] turns calls into `tracing` events.
//!
//! # Invariants
//!
//! - Host output methods are total. Write failures are reported through
//!   `tracing` under the `condcon::sink` target and never reach the caller.
//! - Hosts use interior mutability and are called through `&self`; none of
//!   them are `Sync`, matching the single-threaded gate that drives them.
//!
//! # Examples
//!
//! ```
//! use gate_sink::{ConsoleMethod, HostConsole, MemoryConsole};
//!
//! let console = MemoryConsole::new();
//! console.call(ConsoleMethod::Log, format_args!("hello {}", "world"));
//! assert_eq!(console.messages(), vec!["hello world"]);
//! ```

mod buffer;
mod host;
mod line_mode;
mod memory;
mod method;
mod tracing_console;
mod writer;

pub use buffer::SharedBuffer;
pub use host::HostConsole;
pub use line_mode::LineMode;
pub use memory::{ConsoleEntry, MemoryConsole};
pub use method::{ConsoleMethod, ParseMethodError, Stream};
pub use tracing_console::TracingConsole;
pub use writer::{StdConsole, WriterConsole};
