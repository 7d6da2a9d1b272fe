//! Type categories and the reporting language.
//!
//! Run with `cargo run -p gate --example types`.

use gate::{Console, Result, registry};

fn main() -> Result<()> {
    let cci = registry::instance(None);

    for name in ["error", "warning", "info"] {
        cci.add_type(name)?;
    }
    cci.set_reporting("all -info")?;

    cci.category("error").log(format_args!("We log error messages."));
    cci.category("info").log(format_args!("But not simple information."));
    cci.category("warning").log(format_args!("Warnings are also logged."));

    // Unknown names in a reporting string are defined on the spot.
    cci.set_reporting("+info +secondary")?;

    cci.category("info").log(format_args!("Logging info now."));
    cci.category("secondary")
        .log(format_args!("Secondary was created by the previous reporting string."));
    cci.category("something")
        .log(format_args!("Something is not enabled, so it is not logged."));

    Ok(())
}
