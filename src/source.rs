//! Where the page stream comes from.

use crate::error::{Result, SelpgError};
use crate::streaming::buffers::DEFAULT_INPUT_BUFFER;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Input for one selection run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Read the process's standard input.
    #[default]
    StandardInput,
    /// Read a file on disk.
    NamedFile(PathBuf),
}

impl InputSource {
    /// Build from the optional positional argument; `None` or `-` mean stdin.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("") | Some("-") => Self::StandardInput,
            Some(path) => Self::NamedFile(PathBuf::from(path)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::StandardInput => None,
            Self::NamedFile(path) => Some(path),
        }
    }

    /// Standard input is drained to EOF after the scan so an upstream
    /// writer in a pipeline never blocks or sees a broken pipe.
    pub fn drains_after_scan(&self) -> bool {
        matches!(self, Self::StandardInput)
    }

    /// Open the source for buffered reading.
    ///
    /// The returned reader owns the file handle, so it is closed on drop
    /// along every exit path.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Self::StandardInput => Ok(Box::new(io::stdin().lock())),
            Self::NamedFile(path) => {
                let file = File::open(path).map_err(|source| SelpgError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::with_capacity(DEFAULT_INPUT_BUFFER, file)))
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StandardInput => write!(f, "<stdin>"),
            Self::NamedFile(path) => write!(f, "{}", path.display()),
        }
    }
}
