//! Shared helpers for the selpg integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

// =============================================================================
// Fixtures
// =============================================================================

/// `1\n2\n...n\n`, one integer per line.
pub fn numbered_lines(n: usize) -> String {
    (1..=n).map(|i| format!("{}\n", i)).collect()
}

/// Lines `from..=to`, newline terminated.
pub fn line_range(from: usize, to: usize) -> String {
    (from..=to).map(|i| format!("{}\n", i)).collect()
}

/// `1\f2\f...n\f`, one integer per form-feed page.
pub fn form_feed_pages(n: usize) -> String {
    (1..=n).map(|i| format!("{}\x0c", i)).collect()
}

pub fn create_input_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// Running the binary
// =============================================================================

pub fn selpg() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_selpg"));
    cmd.env_remove("RUST_LOG").env_remove("SELPG_SPOOLER");
    cmd
}

pub fn run_selpg(args: &[&str]) -> Output {
    selpg()
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run selpg")
}

pub fn run_selpg_with_stdin(args: &[&str], stdin_content: &str) -> Output {
    run_command_with_stdin(selpg().args(args), stdin_content)
}

pub fn run_command_with_stdin(cmd: &mut Command, stdin_content: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn selpg");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_content.as_bytes()).unwrap();
    }

    child.wait_with_output().expect("Failed to wait for selpg")
}

pub fn is_success(output: &Output) -> bool {
    output.status.success()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
