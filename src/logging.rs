//! Diagnostic logging.
//!
//! Events go to stderr so that stdout carries nothing but selected pages.
//! `RUST_LOG` takes precedence over `-v` when set.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. Safe to call multiple times.
pub fn init(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("selpg={}", level_for(verbosity))));
        // Another subscriber may already be installed (tests, embedding).
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .with(filter)
            .try_init();
    });
}
