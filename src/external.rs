use crate::command::{Command, ExitCode};
use crate::env::Environment;
use crate::error::ShellError;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Separator between directories of the search path.
const PATH_LIST_SEPARATOR: char = ':';

/// A program launched as a child process.
pub struct ExternalCommand<'a> {
    program: Cow<'a, Path>,
    command: &'a Command,
}

impl<'a> ExternalCommand<'a> {
    /// Resolve `command` against `search_paths` and check that the result can
    /// be executed.
    pub fn try_create(
        search_paths: Option<&OsStr>,
        command: &'a Command,
    ) -> Result<Self, ShellError> {
        let program =
            find_command_path(search_paths, command.name()).ok_or(ShellError::NotFound)?;
        if fs::metadata(&program).is_err() {
            return Err(ShellError::NotFound);
        }
        if !is_executable(&program) {
            return Err(ShellError::PermissionDenied);
        }
        Ok(Self { program, command })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Spawn the program and block until it terminates.
    ///
    /// The child sees `command.args()` as its argument vector, so `argv[0]` is
    /// the name as typed, and exactly the variables in `env`.
    pub fn execute(self, env: &Environment) -> Result<ExitCode, ShellError> {
        let mut cmd = std::process::Command::new(&*self.program);
        set_arg0(&mut cmd, self.command.name());
        cmd.args(&self.command.args()[1..])
            .env_clear()
            .envs(env.vars());

        let mut child = cmd.spawn().map_err(classify_spawn_error)?;
        tracing::debug!(pid = child.id(), program = %self.program.display(), "spawned");

        let exit_status = child.wait().map_err(ShellError::Spawn)?;
        tracing::debug!(pid = child.id(), status = %exit_status, "child exited");
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

/// Resource exhaustion means no child was created; anything else means the
/// child could not load the program.
fn classify_spawn_error(err: io::Error) -> ShellError {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory => ShellError::Spawn(err),
        _ => ShellError::Exec(err),
    }
}

#[cfg(unix)]
fn set_arg0(cmd: &mut std::process::Command, name: &str) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(name);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut std::process::Command, _name: &str) {}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command name the way a typical shell would.
///
/// Behavior:
/// - A name containing `/` is used as-is, without consulting the search path.
/// - Otherwise each non-empty directory of `search_paths` is tried in order and
///   the first executable `dir/name` wins.
/// - Missing search path or empty name: returns `None`.
///
/// Returns either a borrowed view of `name` or an owned `PathBuf` when the
/// result is discovered via the search path.
pub fn find_command_path<'a>(search_paths: Option<&OsStr>, name: &'a str) -> Option<Cow<'a, Path>> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        return Some(Cow::Borrowed(Path::new(name)));
    }
    let search_paths = search_paths?.to_str()?;
    find_in_path(search_paths, name).map(Cow::Owned)
}

fn find_in_path(search_paths: &str, cmd: &str) -> Option<PathBuf> {
    for dir in search_paths
        .split(PATH_LIST_SEPARATOR)
        .filter(|dir| !dir.is_empty())
    {
        let path = Path::new(dir).join(cmd);
        if is_executable(&path) {
            tracing::trace!(candidate = %path.display(), "matched");
            return Some(path);
        }
        tracing::trace!(candidate = %path.display(), "rejected");
    }
    None
}

/// Whether `path` names a regular file the current user may execute.
///
/// Symlinks are followed. Any failure to query the file counts as `false`.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => access(path, AccessFlags::X_OK).is_ok(),
        _ => false,
    }
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
