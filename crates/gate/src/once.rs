//! crates/gate/src/once.rs
//! Tracks which once-labels have already produced output.

use std::collections::HashSet;

/// Remembers labels whose output has fired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnceTracker {
    fired: HashSet<String>,
}

impl OnceTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests `label` against the tracker.
    ///
    /// Returns `false` when the label already fired. Otherwise returns `true`
    /// and records the label only when `state_now` is `true`, so a label whose
    /// chain fails for other reasons stays available.
    pub fn test(&mut self, label: &str, state_now: bool) -> bool {
        if self.fired.contains(label) {
            return false;
        }
        if state_now {
            self.fired.insert(label.to_owned());
        }
        true
    }

    /// Clears `label`, or every label when `None`.
    pub fn reset(&mut self, label: Option<&str>) {
        match label {
            Some(label) => {
                self.fired.remove(label);
            }
            None => self.fired.clear(),
        }
    }

    /// Returns whether `label` has fired.
    #[must_use]
    pub fn has_fired(&self, label: &str) -> bool {
        self.fired.contains(label)
    }

    /// Number of labels that have fired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fired.len()
    }

    /// Returns `true` when no label has fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}
