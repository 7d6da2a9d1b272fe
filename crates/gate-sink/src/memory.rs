//! crates/gate-sink/src/memory.rs
//! Recording host console for tests and embedders.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;

use crate::host::HostConsole;
use crate::method::ConsoleMethod;

/// Output captured by a [`MemoryConsole`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsoleEntry {
    /// The method that was invoked.
    pub method: ConsoleMethod,
    /// The formatted arguments.
    pub message: String,
}

/// Host console that records every call instead of writing it anywhere.
///
/// By default every [`ConsoleMethod`] is supported. [`MemoryConsole::supporting`]
/// restricts the set, which lets tests exercise the no-op binding a gate uses
/// for missing host methods.
#[derive(Debug)]
pub struct MemoryConsole {
    supported: BTreeSet<ConsoleMethod>,
    entries: RefCell<Vec<ConsoleEntry>>,
}

impl Default for MemoryConsole {
    fn default() -> Self {
        Self::supporting(ConsoleMethod::ALL)
    }
}

impl MemoryConsole {
    /// Creates a console supporting every method.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a console that only supports `methods`.
    #[must_use]
    pub fn supporting<I>(methods: I) -> Self
    where
        I: IntoIterator<Item = ConsoleMethod>,
    {
        Self {
            supported: methods.into_iter().collect(),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Returns a copy of the recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<ConsoleEntry> {
        self.entries.borrow().clone()
    }

    /// Returns the recorded messages in call order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Drains all recorded entries, clearing the internal buffer.
    pub fn drain(&self) -> Vec<ConsoleEntry> {
        self.entries.borrow_mut().drain(..).collect()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl HostConsole for MemoryConsole {
    fn supports(&self, method: ConsoleMethod) -> bool {
        self.supported.contains(&method)
    }

    fn call(&self, method: ConsoleMethod, args: fmt::Arguments<'_>) {
        self.entries.borrow_mut().push(ConsoleEntry {
            method,
            message: args.to_string(),
        });
    }
}
