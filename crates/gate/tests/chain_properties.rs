//! Integration tests for condition chains.
//!
//! These tests drive a gate through the public `Console` interface and check
//! the resolution rules: AND/OR folding, reset after every output call, the
//! lock, once-labels, verbosity and sentinel absorption.

use std::cell::Cell;
use std::rc::Rc;

use gate::{Console, Gate, NEVERENDING};
use proptest::prelude::*;

/// Builds a gate whose `hit` binding counts calls.
fn counting_gate() -> (Gate, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let gate = Gate::new();
    gate.add_function("hit", move |_| counter.set(counter.get() + 1))
        .expect("bind hit");
    (gate, hits)
}

fn hit(console: &dyn Console) -> &dyn Console {
    console.invoke("hit", format_args!(""))
}

// ============================================================================
// AND / OR Folding
// ============================================================================

/// Verifies two passing checks resolve true.
#[test]
fn and_of_true_checks_passes() {
    let gate = Gate::new();
    gate.check(true).check(true);
    assert!(gate.resolve());
}

/// Verifies a single false check fails an AND chain regardless of position.
#[test]
fn single_false_fails_and_chain() {
    let gate = Gate::new();
    gate.check(false).and().check(true).and().check(true);
    assert!(!gate.resolve());

    gate.check(true).and().check(true).and().check(false);
    assert!(!gate.resolve());
}

/// Verifies `or().check(false).check(true)` passes.
#[test]
fn or_chain_passes() {
    let gate = Gate::new();
    gate.or().check(false).check(true);
    assert!(gate.resolve());
}

/// Verifies OR stays in effect for every later check.
#[test]
fn or_persists_across_checks() {
    let gate = Gate::new();
    gate.check(false).or().check(false).check(true);
    assert!(gate.resolve());
}

/// Verifies `and()` ends an OR run.
#[test]
fn and_ends_or_run() {
    let gate = Gate::new();
    gate.check(false).or().check(true).and().check(false);
    assert!(!gate.resolve());
}

/// Verifies OR carries into composite checks.
#[test]
fn or_carries_into_category_checks() {
    let gate = Gate::new();
    gate.set_reporting("+net").expect("reporting");
    gate.check(false).or().check(false).category("net");
    assert!(gate.resolve());
}

/// Verifies an output call ends an OR run for the next chain.
#[test]
fn resolution_restores_and() {
    let gate = Gate::new();
    gate.or().check(true);
    gate.resolve();
    gate.check(true).check(false);
    assert!(!gate.resolve());
}

/// Verifies OR rescues an earlier failure.
#[test]
fn or_rescues_failure() {
    let gate = Gate::new();
    gate.check(false).or().check(true);
    assert!(gate.resolve());
}

/// Verifies resolving twice without checks passes both times.
#[test]
fn double_resolution_is_idempotent() {
    let gate = Gate::new();
    assert!(gate.resolve());
    assert!(gate.resolve());

    gate.check(false);
    gate.resolve();
    assert!(gate.resolve());
    assert!(gate.resolve());
}

// ============================================================================
// Lock
// ============================================================================

/// Verifies failing checks after a lock do not change the state.
#[test]
fn lock_ignores_later_checks() {
    let gate = Gate::new();
    gate.check(true).lock().check(false).check(false);
    assert!(gate.state());

    gate.release_lock();
    assert!(!gate.state());
}

/// Verifies a failed lock suppresses output across many chains.
#[test]
fn failed_lock_suppresses_output() {
    let (gate, hits) = counting_gate();
    gate.check(false).lock();
    for _ in 0..5 {
        hit(&gate);
    }
    assert_eq!(hits.get(), 0);

    gate.release_lock();
    hit(&gate);
    assert_eq!(hits.get(), 1);
}

// ============================================================================
// Once
// ============================================================================

/// Verifies a label passes once, then fails.
#[test]
fn once_label_fails_second_time() {
    let gate = Gate::new();
    gate.once("a");
    assert!(gate.resolve());
    gate.once("a");
    assert!(!gate.resolve());
}

/// Verifies a failed chain does not consume the label.
#[test]
fn once_under_false_chain_is_not_consumed() {
    let gate = Gate::new();
    gate.check(false).once("a");
    assert!(!gate.resolve());

    gate.once("a");
    assert!(gate.resolve());
    gate.once("a");
    assert!(!gate.resolve());
}

/// Verifies labels are independent.
#[test]
fn once_labels_are_independent() {
    let (gate, hits) = counting_gate();
    hit(gate.once("x"));
    hit(gate.once("y"));
    hit(gate.once("x"));
    assert_eq!(hits.get(), 2);
}

// ============================================================================
// Verbosity
// ============================================================================

/// Verifies a level passes when the threshold is at least that level.
#[test]
fn verbosity_two_against_thresholds() {
    let gate = Gate::new();
    for (threshold, expected) in [(0, false), (1, false), (2, true), (3, true)] {
        gate.set_verbosity(threshold);
        gate.verbosity(2);
        assert_eq!(gate.resolve(), expected, "threshold {threshold}");
    }
}

// ============================================================================
// Sentinel Absorption
// ============================================================================

/// Verifies chains after a failed output never reach a binding.
#[test]
fn sentinel_never_triggers_side_effects() {
    let (gate, hits) = counting_gate();
    let mut console = hit(gate.check(false));
    for _ in 0..100 {
        console = hit(console.check(true).or().check(true));
    }
    assert!(std::ptr::addr_eq(console, &NEVERENDING));
    assert_eq!(hits.get(), 0);
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum Step {
    Check(bool),
    And,
    Or,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<bool>().prop_map(Step::Check),
        Just(Step::And),
        Just(Step::Or),
    ]
}

fn run(gate: &Gate, steps: &[Step]) {
    for step in steps {
        match *step {
            Step::Check(value) => gate.check(value),
            Step::And => gate.and(),
            Step::Or => gate.or(),
        };
    }
}

proptest! {
    /// Any false check in a pure AND chain fails it.
    #[test]
    fn and_chain_is_conjunction(values in prop::collection::vec(any::<bool>(), 0..24)) {
        let gate = Gate::new();
        for value in &values {
            gate.and().check(*value);
        }
        prop_assert_eq!(gate.resolve(), values.iter().all(|v| *v));
    }

    /// Chains fold strictly left to right; OR holds until `and()`.
    #[test]
    fn chain_matches_left_fold(steps in prop::collection::vec(step(), 0..24)) {
        let gate = Gate::new();
        run(&gate, &steps);

        let mut or = false;
        let mut expected = true;
        for step in &steps {
            match *step {
                Step::Check(value) => {
                    expected = if or { expected || value } else { expected && value };
                }
                Step::And => or = false,
                Step::Or => or = true,
            }
        }
        prop_assert_eq!(gate.resolve(), expected);
    }

    /// Every resolution leaves a fresh, passing chain behind.
    #[test]
    fn resolution_resets(steps in prop::collection::vec(step(), 0..24)) {
        let gate = Gate::new();
        run(&gate, &steps);
        gate.resolve();
        prop_assert!(gate.resolve());
    }

    /// Output passes exactly when the chain state did.
    #[test]
    fn output_follows_state(steps in prop::collection::vec(step(), 0..24)) {
        let (gate, hits) = counting_gate();
        run(&gate, &steps);
        let expected = gate.state();
        hit(&gate);
        prop_assert_eq!(hits.get() == 1, expected);
    }
}
