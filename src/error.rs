//! Error types for argument validation, input streaming and spooling.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Reasons a set of raw options cannot become a [`SelectionRequest`].
///
/// All of these are detected before any input is opened.
///
/// [`SelectionRequest`]: crate::options::SelectionRequest
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("valid start page number does not exist (got {0}, expected --s >= 1)")]
    InvalidStartPage(i64),

    #[error("valid end page number does not exist (got {0}, expected --e >= 1)")]
    InvalidEndPage(i64),

    #[error("end page {end} is smaller than start page {start}")]
    EndBeforeStart { start: i64, end: i64 },

    #[error("invalid page length {0} (expected --l >= 1)")]
    InvalidPageLength(i64),

    #[error("only one way of delimiting pages can be chosen: --f conflicts with --l")]
    ConflictingDelimiters,

    #[error("there should be at most one input file (got {0})")]
    TooManyInputFiles(usize),
}

/// Errors that can occur while selecting pages.
#[derive(Error, Debug)]
pub enum SelpgError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot open input file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot start spooler '{program}': {source}")]
    SpoolerSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot open input pipe of spooler '{0}'")]
    SpoolerStdin(String),

    #[error("cannot write pages to spooler '{program}': {source}")]
    SpoolerWrite {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("spooler '{program}' did not complete: {source}")]
    SpoolerWait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("spooler '{program}' exited with {status}: {output}")]
    SpoolerFailed {
        program: String,
        status: ExitStatus,
        output: String,
    },
}

pub type Result<T> = std::result::Result<T, SelpgError>;
