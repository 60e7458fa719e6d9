//! Global configuration for selpg runtime behavior.
//!
//! Values here are set once at startup from the command line and the
//! environment, then read by the streamer and the spooler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Lines per page when `--l` is not given.
pub const DEFAULT_PAGE_LENGTH: i64 = 72;

/// Print spooler invoked when `--d` names a destination.
pub const DEFAULT_SPOOLER: &str = "lp";

/// Environment variable that replaces [`DEFAULT_SPOOLER`].
pub const SPOOLER_ENV: &str = "SELPG_SPOOLER";

/// Flag passed to the spooler ahead of the destination name.
pub const DESTINATION_FLAG: &str = "-d";

/// Global flag for printing run statistics to stderr.
static STATS: AtomicBool = AtomicBool::new(false);

/// Spooler program chosen on the command line, if any.
static SPOOLER: RwLock<Option<String>> = RwLock::new(None);

/// Enable or disable the post-run statistics line.
#[inline]
pub fn set_stats(enabled: bool) {
    STATS.store(enabled, Ordering::Release);
}

/// Check if the statistics line is enabled.
#[inline]
pub fn stats_enabled() -> bool {
    STATS.load(Ordering::Acquire)
}

/// Override the spooler program for the rest of the process.
///
/// Passing `None` restores the environment/default lookup.
pub fn set_spooler(program: Option<String>) {
    let mut slot = SPOOLER.write().unwrap_or_else(|e| e.into_inner());
    *slot = program;
}

/// Resolve the spooler program.
///
/// Order: [`set_spooler`], then `$SELPG_SPOOLER`, then `lp`.
pub fn spooler_program() -> String {
    let slot = SPOOLER.read().unwrap_or_else(|e| e.into_inner());
    if let Some(program) = slot.as_ref() {
        return program.clone();
    }
    match std::env::var(SPOOLER_ENV) {
        Ok(program) if !program.trim().is_empty() => program,
        _ => DEFAULT_SPOOLER.to_string(),
    }
}
