//! crates/gate/src/registry.rs
//!
//! Thread-local registry of named gates.
//!
//! Each thread owns its own map from name to [`Gate`], so code that asks for
//! the same name on one thread shares one gate without passing it around.
//! Gates are created lazily on first request.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gate_sink::StdConsole;

use crate::config::GateConfig;
use crate::gate::Gate;

/// Name used when no instance name is given.
pub const DEFAULT_INSTANCE: &str = "cci";

thread_local! {
    static INSTANCES: RefCell<HashMap<String, Rc<Gate>>> = RefCell::new(HashMap::new());
}

/// Returns the gate registered as `name`, creating it on first use.
///
/// A new gate is bound to the process's stdout and stderr and initialized
/// from [`GateConfig::from_env`].
#[must_use]
pub fn instance(name: Option<&str>) -> Rc<Gate> {
    instance_with(name, || {
        let gate = Gate::with_host(StdConsole::stdio());
        if let Err(error) = gate.apply_config(&GateConfig::from_env()) {
            tracing::warn!(target: "condcon::registry", %error, "ignoring environment configuration");
        }
        gate
    })
}

/// Returns the gate registered as `name`, creating it without output
/// bindings on first use.
#[must_use]
pub fn bare_instance(name: Option<&str>) -> Rc<Gate> {
    instance_with(name, Gate::new)
}

/// Returns the gate registered as `name`, creating it with `build` on first
/// use.
///
/// An existing gate is returned as is; `build` only runs for new names.
pub fn instance_with<F>(name: Option<&str>, build: F) -> Rc<Gate>
where
    F: FnOnce() -> Gate,
{
    let name = name.unwrap_or(DEFAULT_INSTANCE);
    if let Some(existing) = INSTANCES.with_borrow(|instances| instances.get(name).cloned()) {
        return existing;
    }

    let gate = Rc::new(build());
    tracing::debug!(target: "condcon::registry", name, "created gate instance");
    INSTANCES.with_borrow_mut(|instances| {
        Rc::clone(
            instances
                .entry(name.to_owned())
                .or_insert_with(|| Rc::clone(&gate)),
        )
    })
}

/// Removes the gate registered as `name` and returns it.
///
/// Clones already handed out keep working; the next request for `name`
/// creates a fresh gate.
pub fn forget(name: Option<&str>) -> Option<Rc<Gate>> {
    let name = name.unwrap_or(DEFAULT_INSTANCE);
    INSTANCES.with_borrow_mut(|instances| instances.remove(name))
}

/// Names of the gates registered on this thread, sorted.
#[must_use]
pub fn names() -> Vec<String> {
    let mut names = INSTANCES.with_borrow(|instances| instances.keys().cloned().collect::<Vec<_>>());
    names.sort_unstable();
    names
}
