//! Gated output forwarded to `tracing`.
//!
//! The gate's own diagnostics use targets under `condcon::`, so
//! `RUST_LOG=condcon=debug` shows both the forwarded messages and the
//! gate's bookkeeping.
//!
//! Run with `RUST_LOG=debug cargo run -p gate --example tracing_demo`.

use gate::{Console, Gate, GateConfig, Result};
use gate_sink::TracingConsole;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GateConfig::from_query("cc-reporting=%2Bnet+%2Bdisk&cc-verbosity=1");
    let gate = Gate::from_config(TracingConsole::new(), &config)?;

    gate.category("net").info(format_args!("connected to {}", "10.0.0.7:873"));
    gate.category("disk").verbosity(1).warn(format_args!("disk 91% full"));
    gate.category("ui").info(format_args!("not enabled, dropped"));
    gate.verbosity(2).debug(format_args!("above the threshold, dropped"));
    gate.check(true).or().category("ui").error(format_args!("checks combine left to right"));

    Ok(())
}
