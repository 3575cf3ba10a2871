//! Diagnostic logging for pokectl
//!
//! Logs go to stderr so `--json` output on stdout stays machine-readable.
//! RUST_LOG wins over the default level; `--verbose` raises the default to debug.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose {
        "pokectl=debug,poke_common=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
