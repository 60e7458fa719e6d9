//! Forwarding the selected pages to an external print spooler.
//!
//! The spooler is run as `<program> -d <destination>`. The selection is fed
//! to its stdin from a scoped writer thread while its stdout and stderr are
//! collected, so a spooler that talks before it has read all of its input
//! cannot wedge either side. The writer drops stdin when done, which is
//! the spooler's end of input.

use crate::config::{self, DESTINATION_FLAG};
use crate::error::{Result, SelpgError};
use std::io::{self, Write};
use std::process::{ChildStdin, Command, ExitStatus, Stdio};
use std::thread;
use tracing::debug;

/// Handle on the print command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spooler {
    program: String,
}

/// What the spooler printed, stdout first then stderr.
#[derive(Debug)]
pub struct SpoolReport {
    pub status: ExitStatus,
    pub output: Vec<u8>,
}

impl SpoolReport {
    /// Copy the spooler's output to our stderr; stdout carries only page data.
    pub fn surface(&self) -> io::Result<()> {
        if self.output.is_empty() {
            return Ok(());
        }
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        handle.write_all(&self.output)?;
        handle.flush()
    }
}

impl Spooler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Spooler resolved from `--spooler`, `$SELPG_SPOOLER` or `lp`.
    pub fn from_config() -> Self {
        Self::new(config::spooler_program())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Send `data` to `destination` and wait for the spooler to finish.
    ///
    /// A spooler that exits unsuccessfully is an error carrying its output.
    pub fn send(&self, destination: &str, data: &[u8]) -> Result<SpoolReport> {
        debug!(
            program = %self.program,
            destination,
            bytes = data.len(),
            "starting spooler"
        );
        let mut child = Command::new(&self.program)
            .arg(DESTINATION_FLAG)
            .arg(destination)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SelpgError::SpoolerSpawn {
                program: self.program.clone(),
                source,
            })?;

        let stdin = match child.stdin.take() {
            Some(stdin) => stdin,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SelpgError::SpoolerStdin(self.program.clone()));
            }
        };

        // Both halves finish before the scope ends, so the child is always
        // reaped, even when feeding it fails.
        let (written, finished) = thread::scope(|scope| {
            let writer = scope.spawn(move || feed(stdin, data));
            let finished = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("spooler writer panicked")));
            (written, finished)
        });

        let finished = finished.map_err(|source| SelpgError::SpoolerWait {
            program: self.program.clone(),
            source,
        })?;
        written.map_err(|source| SelpgError::SpoolerWrite {
            program: self.program.clone(),
            source,
        })?;

        let mut output = finished.stdout;
        output.extend_from_slice(&finished.stderr);
        debug!(program = %self.program, status = %finished.status, "spooler finished");

        if !finished.status.success() {
            return Err(SelpgError::SpoolerFailed {
                program: self.program.clone(),
                status: finished.status,
                output: String::from_utf8_lossy(&output).trim().to_string(),
            });
        }

        Ok(SpoolReport {
            status: finished.status,
            output,
        })
    }
}

/// Write all of `data` to the spooler, then close its input.
fn feed(mut stdin: ChildStdin, data: &[u8]) -> io::Result<()> {
    match stdin.write_all(data) {
        Ok(()) => Ok(()),
        // The spooler quit without reading; its exit status says why.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("spooler closed its input early");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
