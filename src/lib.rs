//! selpg: select a contiguous range of pages from a text stream.
//!
//! A page is either a fixed number of lines or everything up to a form-feed
//! byte. The library validates a page range, scans the input once, and
//! returns the selected bytes exactly as they appeared.
//!
//! # Features
//!
//! - **Single pass**: no seeking; input after the range is never read from
//!   files and is drained (not stored) from standard input
//! - **Byte exact**: no encoding is assumed, terminators are preserved
//! - **Spooling**: the selection can be mirrored to `lp -d <destination>`
//!
//! # Example
//!
//! ```rust
//! use selpg::{PageSelector, RawOptions};
//!
//! let request = RawOptions::pages(2, 4).with_form_feed().validate().unwrap();
//! let selection = PageSelector::new(request)
//!     .select(&b"1\x0c2\x0c3\x0c4\x0c5\x0c"[..], false)
//!     .unwrap();
//! assert_eq!(selection.output, b"2\x0c3\x0c");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod select;
pub mod source;
pub mod spool;
pub mod streaming;

// Re-export commonly used types
pub use error::{Result, SelpgError, ValidationError};
pub use options::{PageMode, RawOptions, SelectionRequest};
pub use select::{PageSelector, Selection, SelectionStats};
pub use source::InputSource;
pub use spool::{SpoolReport, Spooler};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{SelpgError, ValidationError};
    pub use crate::options::{PageMode, RawOptions, SelectionRequest};
    pub use crate::select::{PageSelector, Selection, SelectionStats};
    pub use crate::source::InputSource;
}
