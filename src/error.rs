//! Line-level failures and the diagnostic format used to report them.

use crate::command::ExitCode;
use std::fmt::Display;
use std::io::{self, Write};
use thiserror::Error;

/// Reasons a command line could not be carried out.
#[derive(Debug, Error)]
pub enum ShellError {
    /// No builtin matched and the search path had no executable of that name.
    #[error("not found")]
    NotFound,
    /// The name resolved to a path that is not an executable regular file.
    #[error("Permission denied")]
    PermissionDenied,
    /// The child process could not be created.
    #[error("{}", os_message(.0))]
    Spawn(#[source] io::Error),
    /// The child was created but the program image could not be loaded.
    #[error("{}", os_message(.0))]
    Exec(#[source] io::Error),
}

impl ShellError {
    /// Status code a line ends with when it fails this way.
    pub fn status(&self) -> ExitCode {
        match self {
            ShellError::NotFound | ShellError::Exec(_) => 127,
            ShellError::PermissionDenied => 126,
            ShellError::Spawn(_) => 1,
        }
    }
}

/// The OS description of an error, without Rust's `(os error N)` suffix.
#[cfg(unix)]
pub fn os_message(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(raw) => nix::errno::Errno::from_i32(raw).desc().to_string(),
        None => err.to_string(),
    }
}

#[cfg(not(unix))]
pub fn os_message(err: &io::Error) -> String {
    err.to_string()
}

/// Writes `<program>: <context>: <command>: <message>` as one line.
///
/// Diagnostics are best effort: a failing error stream is ignored.
pub fn report(
    stderr: &mut dyn Write,
    program_name: &str,
    context: usize,
    command_name: &str,
    message: &dyn Display,
) {
    let _ = writeln!(stderr, "{program_name}: {context}: {command_name}: {message}");
    let _ = stderr.flush();
}
