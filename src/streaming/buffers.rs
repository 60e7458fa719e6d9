//! Buffer size constants for streaming operations.
//!
//! These constants control memory usage vs I/O throughput tradeoffs.

/// Default input buffer size (64 KB).
/// Large enough that most pages are found within one fill.
pub const DEFAULT_INPUT_BUFFER: usize = 64 * 1024;

/// Default output buffer size (64 KB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 64 * 1024;

/// Initial capacity of the per-record scratch buffer (1 KB).
/// Sufficient for most lines; form-feed pages grow it as needed.
pub const DEFAULT_RECORD_BUFFER: usize = 1024;

/// Initial capacity of the selected-output buffer (16 KB).
pub const DEFAULT_SELECTION_BUFFER: usize = 16 * 1024;
