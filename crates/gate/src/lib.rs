#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/gate/src/lib.rs
//!
//! # Overview
//!
//! `gate` puts a chain of conditions in front of a host console. Conditions
//! accumulate on a [`Gate`] and the next output call resolves them: when the
//! chain passes the message reaches the host and the gate comes back, when it
//! fails nothing is written and the [`Neverending`] sentinel comes back,
//! swallowing whatever the caller chains after it.
//!
//! ```
//! use std::rc::Rc;
//!
//! use gate::{Console, Gate};
//! use gate_sink::MemoryConsole;
//!
//! let host = Rc::new(MemoryConsole::new());
//! let gate = Gate::with_host(host.clone());
//! gate.set_verbosity(1);
//!
//! gate.verbosity(1).log(format_args!("shown"));
//! gate.verbosity(2).log(format_args!("hidden")).warn(format_args!("also hidden"));
//! gate.check(false).or().check(true).info(format_args!("either"));
//!
//! assert_eq!(host.messages(), vec!["shown", "either"]);
//! ```
//!
//! # Conditions
//!
//! - [`Console::check`] folds an arbitrary boolean, [`Console::and`] and
//!   [`Console::or`] set how following ones combine, until changed or the
//!   chain resolves. Evaluation is left to right without precedence.
//! - [`Console::category`] tests a bit-flag type category enabled through
//!   [`Gate::set_reporting`], and [`Console::tags`] tests presence-based tags
//!   enabled through [`Gate::set_tags`]. Both accept the reporting language
//!   described in [`reporting`].
//! - [`Console::verbosity`] passes when the level does not exceed
//!   [`Gate::set_verbosity`].
//! - [`Console::once`], [`Gate::once_here`] and the [`once!`] macro pass the
//!   first time output under a label is produced.
//! - [`Console::lock`] freezes the result across resolutions until
//!   [`Console::release_lock`].
//!
//! # Invariants
//!
//! - Every output call resolves and resets the chain, passing or not. A lock
//!   survives the reset.
//! - Condition and output calls never fail. Unknown categories register
//!   themselves and unbound methods are dropped.
//! - Programmer errors surface as [`GateError`] from the setup operations
//!   ([`Gate::add_type`], [`Gate::add_function`], [`Gate::set_reporting`],
//!   [`GateConfig::from_url`]).
//!
//! # Instances
//!
//! [`registry::instance`] hands out one shared gate per name and thread,
//! bound to stdout and stderr and initialized from the environment
//! ([`GateConfig::from_env`]).

pub mod binder;
pub mod category;
pub mod config;
mod console;
mod error;
mod gate;
pub mod once;
pub mod registry;
pub mod reporting;
pub mod resolver;
pub mod sentinel;

pub use binder::{Binding, BindingKind, Bindings, Handler};
pub use category::{Categories, FlagRegistry, TagSet, TypeReporting};
pub use config::GateConfig;
pub use console::Console;
pub use error::{GateError, Result};
pub use gate::Gate;
pub use once::OnceTracker;
pub use reporting::{ReportingToken, apply_reporting, parse_reporting};
pub use resolver::{Operator, StateResolver};
pub use sentinel::{NEVERENDING, Neverending};
