//! Diagnostic logging to stderr.
//!
//! `RMMP_LOG` takes an `EnvFilter` directive and wins over `-v`. Without it
//! the level is `warn`, `info` with `-v` and `debug` with `-vv`.

use std::io;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RMMP_LOG";

pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
