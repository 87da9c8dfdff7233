// src/telemetry.rs

//! Logging setup.
//!
//! `RUST_LOG` takes precedence; otherwise `-v` raises the level from `warn`
//! to `info`, `debug` and `trace`. Output goes to stderr so report text on
//! stdout stays clean.

use tracing_subscriber::EnvFilter;

pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
