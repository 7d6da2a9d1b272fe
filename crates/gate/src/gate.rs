//! crates/gate/src/gate.rs
//!
//! The [`Gate`] object: resolver, registries, once tracker, verbosity and
//! bindings behind one chainable handle.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use gate_sink::HostConsole;

use crate::binder::{Binding, BindingKind, Bindings, handler};
use crate::category::{Categories, TagSet, TypeReporting};
use crate::config::GateConfig;
use crate::console::Console;
use crate::error::Result;
use crate::once::OnceTracker;
use crate::reporting::apply_reporting;
use crate::resolver::StateResolver;
use crate::sentinel::NEVERENDING;

/// A conditional front for a host console.
///
/// Conditions accumulate through the [`Console`] methods; the next output
/// call resolves them, resets the chain, and either forwards the message to
/// its binding (returning the gate) or drops it (returning
/// [`NEVERENDING`]).
///
/// The gate uses interior mutability and is confined to one thread.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use gate::{Console, Gate};
/// use gate_sink::MemoryConsole;
///
/// let host = Rc::new(MemoryConsole::new());
/// let gate = Gate::with_host(host.clone());
/// gate.set_reporting("+net").unwrap();
///
/// gate.category("net").log(format_args!("connected"));
/// gate.category("disk").log(format_args!("mounted"));
///
/// assert_eq!(host.messages(), vec!["connected"]);
/// ```
#[derive(Default)]
pub struct Gate {
    resolver: Cell<StateResolver>,
    types: RefCell<TypeReporting>,
    tags: RefCell<TagSet>,
    once: RefCell<OnceTracker>,
    verbosity: Cell<u32>,
    bindings: RefCell<Bindings>,
}

impl Gate {
    /// Creates a gate with no output bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gate bound to every method of `host`.
    #[must_use]
    pub fn with_host<H: HostConsole + 'static>(host: H) -> Self {
        let host: Rc<dyn HostConsole> = Rc::new(host);
        let gate = Self::new();
        *gate.bindings.borrow_mut() = Bindings::from_host(&host);
        gate
    }

    /// Creates a gate bound to `host` and initialized from `config`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`apply_config`](Self::apply_config).
    pub fn from_config<H: HostConsole + 'static>(host: H, config: &GateConfig) -> Result<Self> {
        let gate = Self::with_host(host);
        gate.apply_config(config)?;
        Ok(gate)
    }

    fn update(&self, f: impl FnOnce(&mut StateResolver)) {
        let mut resolver = self.resolver.get();
        f(&mut resolver);
        self.resolver.set(resolver);
    }

    /// Binds every method of `host` to this gate.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::DuplicateBinding`](crate::GateError::DuplicateBinding)
    /// when a method is already bound.
    pub fn bind_host<H: HostConsole + 'static>(&self, host: H) -> Result<&Self> {
        let host: Rc<dyn HostConsole> = Rc::new(host);
        self.bindings.borrow_mut().bind_host(&host)?;
        Ok(self)
    }

    /// Adds an output binding named `name`.
    ///
    /// The handler runs through [`Console::invoke`] like any host method.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::DuplicateBinding`](crate::GateError::DuplicateBinding)
    /// when `name` is already bound or is one of the gate's operations.
    pub fn add_function<F>(&self, name: &str, f: F) -> Result<&Self>
    where
        F: Fn(fmt::Arguments<'_>) + 'static,
    {
        self.bindings
            .borrow_mut()
            .insert(name, Binding::new(BindingKind::Custom, handler(f)))?;
        Ok(self)
    }

    /// Returns whether an output binding exists for `name`.
    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.borrow().contains(name)
    }

    /// Defines the type category `name` and returns its flag.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidCategory`](crate::GateError::InvalidCategory)
    /// for `all` and [`GateError::CategoryLimit`](crate::GateError::CategoryLimit)
    /// when no flag is left.
    pub fn add_type(&self, name: &str) -> Result<u64> {
        self.types.borrow_mut().registry_mut().define(name)
    }

    /// Returns the flag for `name`, defining it when unknown.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::CategoryLimit`](crate::GateError::CategoryLimit)
    /// when `name` is new and no flag is left.
    pub fn type_flag(&self, name: &str) -> Result<u64> {
        self.types.borrow_mut().registry_mut().resolve_mask(name)
    }

    /// Applies a reporting string to the enabled type categories.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::CategoryLimit`](crate::GateError::CategoryLimit)
    /// when a token introduces one type too many.
    pub fn set_reporting(&self, input: &str) -> Result<&Self> {
        let mut types = self.types.borrow_mut();
        let applied = apply_reporting(input, &mut *types);
        tracing::debug!(target: "condcon::reporting", input, mask = types.mask(), "reporting changed");
        applied.map(|()| self)
    }

    /// The mask of enabled type categories.
    #[must_use]
    pub fn reporting_mask(&self) -> u64 {
        self.types.borrow().mask()
    }

    /// Applies a reporting string to the enabled tags.
    pub fn set_tags(&self, input: &str) -> &Self {
        let mut tags = self.tags.borrow_mut();
        tags.apply(input);
        tracing::debug!(target: "condcon::reporting", input, enabled = tags.enabled().count(), "tags changed");
        self
    }

    /// Enabled tags in sorted order.
    #[must_use]
    pub fn enabled_tags(&self) -> Vec<String> {
        self.tags.borrow().enabled().map(str::to_owned).collect()
    }

    /// Sets the verbosity threshold.
    pub fn set_verbosity(&self, level: u32) -> &Self {
        self.verbosity.set(level);
        tracing::debug!(target: "condcon::verbosity", level, "verbosity changed");
        self
    }

    /// The verbosity threshold.
    #[must_use]
    pub fn verbosity_level(&self) -> u32 {
        self.verbosity.get()
    }

    /// Applies a once-condition labelled with the caller's location.
    #[track_caller]
    pub fn once_here(&self) -> &dyn Console {
        let location = Location::caller();
        let label = format!(
            "{}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
        self.once(&label)
    }

    /// Makes `label` available again, or every label when `None`.
    pub fn reset_once(&self, label: Option<&str>) -> &Self {
        self.once.borrow_mut().reset(label);
        tracing::debug!(target: "condcon::once", label = label.unwrap_or("*"), "once reset");
        self
    }

    /// Returns whether output under `label` has fired.
    #[must_use]
    pub fn has_fired(&self, label: &str) -> bool {
        self.once.borrow().has_fired(label)
    }

    /// Current chain result without consuming it.
    #[must_use]
    pub fn state(&self) -> bool {
        self.resolver.get().state()
    }

    /// Returns the chain result and starts a fresh chain.
    pub fn resolve(&self) -> bool {
        let mut resolver = self.resolver.get();
        let passed = resolver.resolve_and_reset();
        self.resolver.set(resolver);
        passed
    }

    /// Returns whether a lock is active.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.resolver.get().is_locked()
    }

    /// Applies initialization parameters.
    ///
    /// Empty reporting and tag strings leave the current state untouched.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`set_reporting`](Self::set_reporting).
    pub fn apply_config(&self, config: &GateConfig) -> Result<&Self> {
        if !config.reporting.is_empty() {
            self.set_reporting(&config.reporting)?;
        }
        if !config.tags.is_empty() {
            self.set_tags(&config.tags);
        }
        self.set_verbosity(config.verbosity);
        Ok(self)
    }
}

impl Console for Gate {
    fn check(&self, condition: bool) -> &dyn Console {
        self.update(|resolver| resolver.check(condition));
        self
    }

    fn and(&self) -> &dyn Console {
        self.update(StateResolver::and);
        self
    }

    fn or(&self) -> &dyn Console {
        self.update(StateResolver::or);
        self
    }

    fn category(&self, name: &str) -> &dyn Console {
        let enabled = self
            .types
            .borrow_mut()
            .is_enabled(name)
            .unwrap_or_else(|error| {
                tracing::warn!(target: "condcon::category", name, %error, "treating type as disabled");
                false
            });
        self.check(enabled)
    }

    fn tags(&self, tags: &str) -> &dyn Console {
        let mut set = self.tags.borrow_mut();
        let mut enabled = false;
        for tag in tags.split(' ').filter(|tag| !tag.is_empty()) {
            enabled |= set.test(tag);
        }
        drop(set);
        self.check(enabled)
    }

    fn verbosity(&self, level: u32) -> &dyn Console {
        self.check(level <= self.verbosity.get())
    }

    fn once(&self, label: &str) -> &dyn Console {
        let state = self.state();
        if !self.once.borrow_mut().test(label, state) {
            return self.check(false);
        }
        self
    }

    fn lock(&self) -> &dyn Console {
        self.update(StateResolver::lock);
        self
    }

    fn release_lock(&self) -> &dyn Console {
        self.update(StateResolver::release_lock);
        self
    }

    fn invoke(&self, method: &str, args: fmt::Arguments<'_>) -> &dyn Console {
        if !self.resolve() {
            return &NEVERENDING;
        }
        let bound = self.bindings.borrow().handler(method);
        match bound {
            Some(output) => output(args),
            None => tracing::trace!(target: "condcon::binder", method, "no binding; dropped"),
        }
        self
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("resolver", &self.resolver.get())
            .field("types", &self.types.borrow())
            .field("tags", &self.tags.borrow())
            .field("once", &self.once.borrow())
            .field("verbosity", &self.verbosity.get())
            .field("bindings", &self.bindings.borrow().len())
            .finish()
    }
}
