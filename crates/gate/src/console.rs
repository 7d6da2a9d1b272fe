//! crates/gate/src/console.rs
//!
//! The chainable interface shared by [`Gate`](crate::Gate) and the
//! [`Neverending`](crate::Neverending) sentinel.
//!
//! Every method returns `&dyn Console`, so a chain keeps going whether the
//! previous output call passed (the gate comes back) or failed (the sentinel
//! comes back and absorbs everything that follows).

use std::fmt;

use gate_sink::ConsoleMethod;

/// Chainable conditions and output calls.
///
/// Only the condition operations and [`invoke`](Console::invoke) are
/// required. The named output methods forward to `invoke` with the
/// corresponding [`ConsoleMethod`] name.
pub trait Console {
    /// Folds `condition` into the pending chain.
    fn check(&self, condition: bool) -> &dyn Console;

    /// Combines following conditions with AND.
    fn and(&self) -> &dyn Console;

    /// Combines following conditions with OR, until [`and`](Console::and)
    /// or the next output call.
    fn or(&self) -> &dyn Console;

    /// Passes when the type category `name` is enabled.
    fn category(&self, name: &str) -> &dyn Console;

    /// Passes when any tag of the space-separated `tags` list is enabled.
    fn tags(&self, tags: &str) -> &dyn Console;

    /// Passes when `level` does not exceed the verbosity threshold.
    fn verbosity(&self, level: u32) -> &dyn Console;

    /// Passes the first time output under `label` is produced.
    fn once(&self, label: &str) -> &dyn Console;

    /// Freezes the current result until [`release_lock`](Console::release_lock).
    fn lock(&self) -> &dyn Console;

    /// Releases a lock taken with [`lock`](Console::lock).
    fn release_lock(&self) -> &dyn Console;

    /// Resolves the chain and calls the output binding `method` when it passed.
    fn invoke(&self, method: &str, args: fmt::Arguments<'_>) -> &dyn Console;

    /// Resolves the chain and calls `method` when it passed.
    fn call(&self, method: ConsoleMethod, args: fmt::Arguments<'_>) -> &dyn Console {
        self.invoke(method.name(), args)
    }

    /// `debug` output.
    fn debug(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Debug, args)
    }

    /// `error` output.
    fn error(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Error, args)
    }

    /// `info` output.
    fn info(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Info, args)
    }

    /// `log` output.
    fn log(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Log, args)
    }

    /// `warn` output.
    fn warn(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Warn, args)
    }

    /// `dir` output.
    fn dir(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Dir, args)
    }

    /// `dirxml` output.
    fn dirxml(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Dirxml, args)
    }

    /// `table` output.
    fn table(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Table, args)
    }

    /// `trace` output.
    fn trace(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Trace, args)
    }

    /// Opens an output group labelled `args`.
    fn group(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Group, args)
    }

    /// Opens a collapsed output group labelled `args`.
    fn group_collapsed(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::GroupCollapsed, args)
    }

    /// Closes the innermost output group.
    fn group_end(&self) -> &dyn Console {
        self.call(ConsoleMethod::GroupEnd, format_args!(""))
    }

    /// Clears the host console.
    fn clear(&self) -> &dyn Console {
        self.call(ConsoleMethod::Clear, format_args!(""))
    }

    /// Bumps and prints the counter labelled `args`.
    fn count(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Count, args)
    }

    /// `assert` output.
    fn assert(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Assert, args)
    }

    /// `markTimeline` output.
    fn mark_timeline(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::MarkTimeline, args)
    }

    /// Starts a profile labelled `args`.
    fn profile(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Profile, args)
    }

    /// Stops the profile labelled `args`.
    fn profile_end(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::ProfileEnd, args)
    }

    /// Starts a timeline labelled `args`.
    fn timeline(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Timeline, args)
    }

    /// Stops the timeline labelled `args`.
    fn timeline_end(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::TimelineEnd, args)
    }

    /// Starts the timer labelled `args`.
    fn time(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::Time, args)
    }

    /// Stops and prints the timer labelled `args`.
    fn time_end(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::TimeEnd, args)
    }

    /// `timeStamp` output.
    fn time_stamp(&self, args: fmt::Arguments<'_>) -> &dyn Console {
        self.call(ConsoleMethod::TimeStamp, args)
    }

    /// `memory` output.
    fn memory(&self) -> &dyn Console {
        self.call(ConsoleMethod::Memory, format_args!(""))
    }
}

/// Applies a once-condition labelled with the call site.
///
/// Works on a gate, a shared `Rc<Gate>`, or the `&dyn Console` values
/// returned mid-chain.
///
/// ```
/// use std::rc::Rc;
///
/// use gate::{Console, Gate, once};
/// use gate_sink::MemoryConsole;
///
/// let host = Rc::new(MemoryConsole::new());
/// let gate = Gate::with_host(host.clone());
/// for _ in 0..3 {
///     once!(gate.check(true)).log(format_args!("first pass only"));
/// }
/// assert_eq!(host.messages(), vec!["first pass only"]);
/// ```
#[macro_export]
macro_rules! once {
    ($console:expr) => {{
        use $crate::Console as _;
        ($console).once(::core::concat!(
            ::core::file!(),
            ":",
            ::core::line!(),
            ":",
            ::core::column!()
        ))
    }};
}
