//! crates/gate-sink/src/host.rs
//! The host console interface a gate forwards output to.

use std::fmt;
use std::rc::Rc;

use crate::method::ConsoleMethod;

/// A logging facility that can receive gated output.
///
/// Hosts use interior mutability: gates share a single host between all of
/// their bindings and call it through `&self`. Output methods are total; a
/// host that fails to write reports the failure through `tracing` instead of
/// returning it.
pub trait HostConsole {
    /// Reports whether the host implements `method`.
    ///
    /// Unsupported methods are bound to a no-op by the gate.
    fn supports(&self, method: ConsoleMethod) -> bool;

    /// Performs `method` with the formatted arguments.
    fn call(&self, method: ConsoleMethod, args: fmt::Arguments<'_>);
}

impl<T> HostConsole for Rc<T>
where
    T: HostConsole + ?Sized,
{
    fn supports(&self, method: ConsoleMethod) -> bool {
        (**self).supports(method)
    }

    fn call(&self, method: ConsoleMethod, args: fmt::Arguments<'_>) {
        (**self).call(method, args);
    }
}

impl<T> HostConsole for &T
where
    T: HostConsole + ?Sized,
{
    fn supports(&self, method: ConsoleMethod) -> bool {
        (**self).supports(method)
    }

    fn call(&self, method: ConsoleMethod, args: fmt::Arguments<'_>) {
        (**self).call(method, args);
    }
}
