//! crates/gate/src/binder.rs
//!
//! Output bindings reachable through [`Console::invoke`](crate::Console::invoke).
//!
//! A binding maps a method name to a handler taking the formatted message.
//! [`Bindings::from_host`] binds every [`ConsoleMethod`] exactly once, using a
//! no-op handler for methods the host does not support, so gated calls to
//! those methods are silently dropped instead of failing.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use gate_sink::{ConsoleMethod, HostConsole};

use crate::error::{GateError, Result};

/// Handler invoked with the message of a passing output call.
pub type Handler = Rc<dyn Fn(fmt::Arguments<'_>)>;

/// Names of the gate's own operations, which bindings may not shadow.
///
/// Covers every public method of [`Gate`](crate::Gate) and
/// [`Console`](crate::Console) that is not itself a host method name, plus
/// the camel-case spellings of the setup calls.
pub const GATE_OPERATIONS: &[&str] = &[
    // Conditions
    "check",
    "and",
    "or",
    "category",
    "type",
    "tags",
    "verbosity",
    "once",
    "once_here",
    "lock",
    "release_lock",
    "releaseLock",
    // Output dispatch
    "invoke",
    "call",
    "group_collapsed",
    "group_end",
    "mark_timeline",
    "profile_end",
    "timeline_end",
    "time_end",
    "time_stamp",
    // Setup and inspection
    "new",
    "with_host",
    "from_config",
    "bind_host",
    "add_function",
    "_addFunction",
    "is_bound",
    "add_type",
    "addType",
    "type_flag",
    "getType",
    "set_reporting",
    "setReporting",
    "reporting_mask",
    "set_tags",
    "setTags",
    "enabled_tags",
    "set_verbosity",
    "setVerbosity",
    "verbosity_level",
    "reset_once",
    "resetOnce",
    "has_fired",
    "state",
    "resolve",
    "is_locked",
    "apply_config",
    "nop",
];

/// Wraps a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(fmt::Arguments<'_>) + 'static,
{
    Rc::new(f)
}

/// Where a binding's handler comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// Forwards to a host console.
    Host,
    /// Placeholder for a method the host does not support.
    Noop,
    /// Added through [`Gate::add_function`](crate::Gate::add_function).
    Custom,
}

/// One named output binding.
#[derive(Clone)]
pub struct Binding {
    kind: BindingKind,
    handler: Handler,
}

impl Binding {
    /// Creates a binding of `kind` around `handler`.
    #[must_use]
    pub fn new(kind: BindingKind, handler: Handler) -> Self {
        Self { kind, handler }
    }

    /// A binding that discards its input.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(BindingKind::Noop, handler(|_| {}))
    }

    /// The binding's origin.
    #[must_use]
    pub const fn kind(&self) -> BindingKind {
        self.kind
    }

    /// A shared handle to the handler.
    #[must_use]
    pub fn handler(&self) -> Handler {
        Rc::clone(&self.handler)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("kind", &self.kind).finish_non_exhaustive()
    }
}

/// The output bindings of one gate.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    entries: BTreeMap<String, Binding>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every [`ConsoleMethod`] to `host`.
    ///
    /// Methods the host does not support are bound to no-ops.
    #[must_use]
    pub fn from_host(host: &Rc<dyn HostConsole>) -> Self {
        let mut bindings = Self::new();
        for method in ConsoleMethod::ALL {
            bindings
                .entries
                .insert(method.name().to_owned(), host_binding(host, method));
        }
        bindings
    }

    /// Adds `binding` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::DuplicateBinding`] when `name` is already bound or
    /// names one of the gate's own operations.
    pub fn insert(&mut self, name: &str, binding: Binding) -> Result<()> {
        if GATE_OPERATIONS.contains(&name) || self.entries.contains_key(name) {
            return Err(GateError::DuplicateBinding(name.to_owned()));
        }
        tracing::debug!(target: "condcon::binder", name, kind = ?binding.kind(), "bound output method");
        self.entries.insert(name.to_owned(), binding);
        Ok(())
    }

    /// Binds every [`ConsoleMethod`] of `host` into this set.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::DuplicateBinding`] for the first method that is
    /// already bound; methods before it stay bound.
    pub fn bind_host(&mut self, host: &Rc<dyn HostConsole>) -> Result<()> {
        for method in ConsoleMethod::ALL {
            self.insert(method.name(), host_binding(host, method))?;
        }
        Ok(())
    }

    /// The handler bound to `name`, if any.
    #[must_use]
    pub fn handler(&self, name: &str) -> Option<Handler> {
        self.entries.get(name).map(Binding::handler)
    }

    /// The binding for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.get(name)
    }

    /// Returns whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn host_binding(host: &Rc<dyn HostConsole>, method: ConsoleMethod) -> Binding {
    if !host.supports(method) {
        return Binding::noop();
    }
    let host = Rc::clone(host);
    Binding::new(
        BindingKind::Host,
        handler(move |args| host.call(method, args)),
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use gate_sink::MemoryConsole;

    use super::*;

    #[test]
    fn from_host_binds_every_method_once() {
        let host: Rc<dyn HostConsole> = Rc::new(MemoryConsole::new());
        let bindings = Bindings::from_host(&host);

        assert_eq!(bindings.len(), ConsoleMethod::ALL.len());
        for method in ConsoleMethod::ALL {
            assert_eq!(
                bindings.get(method.name()).map(Binding::kind),
                Some(BindingKind::Host)
            );
        }
    }

    #[test]
    fn unsupported_methods_become_noops() {
        let memory = Rc::new(MemoryConsole::supporting([ConsoleMethod::Log]));
        let host: Rc<dyn HostConsole> = memory.clone();
        let bindings = Bindings::from_host(&host);

        assert_eq!(bindings.get("log").map(Binding::kind), Some(BindingKind::Host));
        assert_eq!(bindings.get("table").map(Binding::kind), Some(BindingKind::Noop));

        let table = bindings.handler("table").expect("table is bound");
        table(format_args!("dropped"));
        assert!(memory.is_empty());
    }

    #[test]
    fn host_handler_forwards_message() {
        let memory = Rc::new(MemoryConsole::new());
        let host: Rc<dyn HostConsole> = memory.clone();
        let bindings = Bindings::from_host(&host);

        let warn = bindings.handler("warn").expect("warn is bound");
        warn(format_args!("disk {}% full", 93));
        assert_eq!(memory.messages(), vec!["disk 93% full"]);
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut bindings = Bindings::new();
        bindings.insert("beep", Binding::noop()).expect("first insert");
        assert_eq!(
            bindings.insert("beep", Binding::noop()).map_err(|e| e.to_string()),
            Err("unable to add beep function to the gate, because it already exists".to_owned())
        );
    }

    #[test]
    fn insert_rejects_gate_operation_names() {
        let mut bindings = Bindings::new();
        for name in ["check", "once", "setReporting", "invoke"] {
            assert_eq!(
                bindings.insert(name, Binding::noop()),
                Err(GateError::DuplicateBinding(name.to_owned()))
            );
        }
        assert!(bindings.is_empty());
    }

    #[test]
    fn insert_rejects_every_public_gate_method() {
        let mut bindings = Bindings::new();
        for name in [
            "new",
            "with_host",
            "from_config",
            "bind_host",
            "add_function",
            "is_bound",
            "add_type",
            "type_flag",
            "set_reporting",
            "reporting_mask",
            "set_tags",
            "enabled_tags",
            "set_verbosity",
            "verbosity_level",
            "once_here",
            "reset_once",
            "has_fired",
            "state",
            "resolve",
            "is_locked",
            "apply_config",
            "group_end",
            "time_stamp",
        ] {
            assert_eq!(
                bindings.insert(name, Binding::noop()),
                Err(GateError::DuplicateBinding(name.to_owned())),
                "{name}"
            );
        }
        assert!(bindings.is_empty());
    }

    #[test]
    fn gate_operations_leave_host_methods_bindable() {
        for method in ConsoleMethod::ALL {
            assert!(!GATE_OPERATIONS.contains(&method.name()), "{method}");
        }
        let host: Rc<dyn HostConsole> = Rc::new(MemoryConsole::new());
        let mut bindings = Bindings::new();
        bindings.bind_host(&host).expect("bind");
        assert_eq!(bindings.len(), ConsoleMethod::ALL.len());
    }

    #[test]
    fn bind_host_twice_fails() {
        let host: Rc<dyn HostConsole> = Rc::new(MemoryConsole::new());
        let mut bindings = Bindings::new();
        bindings.bind_host(&host).expect("first bind");
        assert_eq!(
            bindings.bind_host(&host),
            Err(GateError::DuplicateBinding("debug".to_owned()))
        );
    }

    #[test]
    fn custom_handler_receives_formatted_message() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut bindings = Bindings::new();
        bindings
            .insert(
                "audit",
                Binding::new(
                    BindingKind::Custom,
                    handler(move |args| sink.borrow_mut().push(args.to_string())),
                ),
            )
            .expect("insert");

        let audit = bindings.handler("audit").expect("bound");
        audit(format_args!("user={}", "root"));
        assert_eq!(*seen.borrow(), vec!["user=root".to_owned()]);
    }

    #[test]
    fn names_are_sorted() {
        let mut bindings = Bindings::new();
        bindings.insert("zz", Binding::noop()).expect("insert");
        bindings.insert("aa", Binding::noop()).expect("insert");
        assert_eq!(bindings.names().collect::<Vec<_>>(), ["aa", "zz"]);
    }
}
