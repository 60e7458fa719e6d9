//! Streaming utilities shared by the page selector.
//!
//! - Buffer sizing constants
//! - memchr-backed delimited record reading
//!
//! The scan keeps only the current record plus the selected output in
//! memory; pages after the end page are never read from a named file.

pub mod buffers;
pub mod records;

pub use records::{count_lines, RecordReader, FORM_FEED, NEWLINE};
