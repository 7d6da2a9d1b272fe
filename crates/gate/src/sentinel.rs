//! crates/gate/src/sentinel.rs
//! The stateless sentinel returned once a chain fails.

use std::fmt;

use crate::console::Console;

/// Absorbs every call made on it.
///
/// A gate hands this back from an output call whose chain failed. Every
/// [`Console`] method returns the sentinel again and does nothing else, so
/// the rest of the chain is swallowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neverending;

/// The shared sentinel instance.
pub static NEVERENDING: Neverending = Neverending;

impl Console for Neverending {
    fn check(&self, _condition: bool) -> &dyn Console {
        self
    }

    fn and(&self) -> &dyn Console {
        self
    }

    fn or(&self) -> &dyn Console {
        self
    }

    fn category(&self, _name: &str) -> &dyn Console {
        self
    }

    fn tags(&self, _tags: &str) -> &dyn Console {
        self
    }

    fn verbosity(&self, _level: u32) -> &dyn Console {
        self
    }

    fn once(&self, _label: &str) -> &dyn Console {
        self
    }

    fn lock(&self) -> &dyn Console {
        self
    }

    fn release_lock(&self) -> &dyn Console {
        self
    }

    fn invoke(&self, _method: &str, _args: fmt::Arguments<'_>) -> &dyn Console {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sentinel(console: &dyn Console) -> bool {
        std::ptr::addr_eq(console, &NEVERENDING)
    }

    #[test]
    fn every_operation_returns_sentinel() {
        let sentinel: &dyn Console = &NEVERENDING;
        assert!(is_sentinel(sentinel.check(true)));
        assert!(is_sentinel(sentinel.and()));
        assert!(is_sentinel(sentinel.or()));
        assert!(is_sentinel(sentinel.category("info")));
        assert!(is_sentinel(sentinel.tags("a b")));
        assert!(is_sentinel(sentinel.verbosity(3)));
        assert!(is_sentinel(sentinel.once("label")));
        assert!(is_sentinel(sentinel.lock()));
        assert!(is_sentinel(sentinel.release_lock()));
        assert!(is_sentinel(sentinel.invoke("anything", format_args!("x"))));
        assert!(is_sentinel(sentinel.log(format_args!("x"))));
        assert!(is_sentinel(sentinel.group_end()));
    }

    #[test]
    fn long_chains_stay_on_sentinel() {
        let end = NEVERENDING
            .log(format_args!("a"))
            .check(true)
            .or()
            .warn(format_args!("b"))
            .table(format_args!("c"))
            .memory();
        assert!(is_sentinel(end));
    }
}
