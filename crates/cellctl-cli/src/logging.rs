//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays reserved for command output (pids,
//! status blocks, JSON). Level is controlled by `RUST_LOG`; without it the
//! default is `warn`, or `debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}
