//! Once-labels: implicit call-site labels, explicit labels, reset, and
//! labels under a failing chain.
//!
//! Run with `cargo run -p gate --example once`.

use gate::{Console, registry};

fn main() {
    let cci = registry::instance(None);

    for text in ["First (shown)", "Second (not shown)"] {
        cci.once_here().log(format_args!("{text}"));
    }

    cci.once("some label").log(format_args!("First with label (shown)"));
    cci.once("some label").log(format_args!("Second with label (not shown)"));
    cci.reset_once(None)
        .once("some label")
        .log(format_args!("Shown again, after reset."));

    cci.check(false)
        .once("cond")
        .log(format_args!("Not printed, and a failing chain does not use up the label."));
    cci.once("cond").log(format_args!("Printed"));
}
