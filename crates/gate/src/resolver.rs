//! crates/gate/src/resolver.rs
//!
//! Boolean accumulator behind a gate's condition chain.
//!
//! Each `check` folds one condition into the running result using the pending
//! operator. The operator stays in effect until `and`, `or` or a resolution
//! changes it, so `a.or().b.c` is `(a || b) || c` and `a.or().b.and().c` is
//! `(a || b) && c`. Evaluation is strictly left to right with no precedence.
//! A lock snapshots the result and reports it for every later resolution
//! until released.

/// How following conditions combine with the accumulated result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Operator {
    /// Both must hold.
    #[default]
    And,
    /// Either may hold.
    Or,
}

/// Accumulated condition state of a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateResolver {
    passed: bool,
    locked_passed: bool,
    is_locked: bool,
    operator: Operator,
}

impl Default for StateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StateResolver {
    /// Creates a resolver that passes until a condition says otherwise.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            passed: true,
            locked_passed: true,
            is_locked: false,
            operator: Operator::And,
        }
    }

    /// Folds `condition` into the accumulated result.
    pub const fn check(&mut self, condition: bool) {
        self.passed = match self.operator {
            Operator::And => self.passed && condition,
            Operator::Or => self.passed || condition,
        };
    }

    /// Makes following conditions combine with AND.
    pub const fn and(&mut self) {
        self.operator = Operator::And;
    }

    /// Makes following conditions combine with OR.
    pub const fn or(&mut self) {
        self.operator = Operator::Or;
    }

    /// Freezes the current result.
    ///
    /// While locked, [`state`](Self::state) reports the frozen result and
    /// later conditions do not change it.
    pub const fn lock(&mut self) {
        self.locked_passed = self.passed;
        self.is_locked = true;
    }

    /// Releases the lock.
    pub const fn release_lock(&mut self) {
        self.is_locked = false;
    }

    /// Current result without consuming it.
    #[must_use]
    pub const fn state(&self) -> bool {
        if self.is_locked {
            self.locked_passed
        } else {
            self.passed
        }
    }

    /// Returns the current result and starts a fresh chain.
    ///
    /// The lock survives the reset.
    pub const fn resolve_and_reset(&mut self) -> bool {
        let state = self.state();
        self.passed = true;
        self.operator = Operator::And;
        state
    }

    /// Returns whether a lock is active.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Operator following conditions combine with.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }
}
