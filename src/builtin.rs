use crate::command::{Command, ExitCode};
use crate::env::Environment;
use anyhow::Result;
use std::ffi::OsStr;
use std::io::Write;

/// What the interpreter should do once a builtin has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Go on reading the next line.
    Continue,
    /// Stop reading input and end with this status.
    Exit(ExitCode),
}

/// Commands implemented inside the interpreter process.
pub(crate) trait BuiltinCommand {
    /// Canonical name of the command, e.g. "exit" or "env".
    fn name(&self) -> &'static str;

    /// Executes the command with the given output stream and environment.
    fn execute(&self, cmd: &Command, stdout: &mut dyn Write, env: &Environment) -> Result<Flow>;
}

/// Fixed, ordered table of builtins, consulted before any path lookup.
pub(crate) struct Builtins {
    commands: Vec<Box<dyn BuiltinCommand>>,
}

impl Builtins {
    pub fn new(commands: Vec<Box<dyn BuiltinCommand>>) -> Self {
        Self { commands }
    }

    /// Runs `cmd` if its name is a builtin.
    ///
    /// Returns `None` when no builtin has that exact name.
    pub fn dispatch(
        &self,
        cmd: &Command,
        stdout: &mut dyn Write,
        env: &Environment,
    ) -> Option<Result<Flow>> {
        let builtin = self.commands.iter().find(|b| b.name() == cmd.name())?;
        tracing::debug!(name = builtin.name(), "builtin");
        Some(builtin.execute(cmd, stdout, env))
    }
}

impl Default for Builtins {
    /// `exit` and `env`, in that order.
    fn default() -> Self {
        Self::new(vec![Box::new(Exit), Box::new(Env)])
    }
}

/// Leave the interpreter with status 0. Arguments are ignored.
pub(crate) struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _cmd: &Command, _stdout: &mut dyn Write, _env: &Environment) -> Result<Flow> {
        Ok(Flow::Exit(0))
    }
}

/// Print every inherited variable as `KEY=VALUE`, unsorted. Arguments are ignored.
pub(crate) struct Env;

impl BuiltinCommand for Env {
    fn name(&self) -> &'static str {
        "env"
    }

    fn execute(&self, _cmd: &Command, stdout: &mut dyn Write, env: &Environment) -> Result<Flow> {
        for (key, value) in env.vars() {
            write_entry(stdout, key, value)?;
        }
        stdout.flush()?;
        Ok(Flow::Continue)
    }
}

#[cfg(unix)]
fn write_entry(stdout: &mut dyn Write, key: &OsStr, value: &OsStr) -> std::io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    stdout.write_all(key.as_bytes())?;
    stdout.write_all(b"=")?;
    stdout.write_all(value.as_bytes())?;
    stdout.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_entry(stdout: &mut dyn Write, key: &OsStr, value: &OsStr) -> std::io::Result<()> {
    writeln!(stdout, "{}={}", key.to_string_lossy(), value.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_ARGS;

    fn run(line: &str, env: &Environment) -> (Option<Flow>, String) {
        let cmd = Command::parse(line, MAX_ARGS).unwrap();
        let mut out = Vec::new();
        let flow = Builtins::default()
            .dispatch(&cmd, &mut out, env)
            .map(|res| res.unwrap());
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_requests_status_zero() {
        let (flow, out) = run("exit", &Environment::default());
        assert_eq!(flow, Some(Flow::Exit(0)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_exit_ignores_arguments() {
        let (flow, _) = run("exit 42", &Environment::default());
        assert_eq!(flow, Some(Flow::Exit(0)));
    }

    #[test]
    fn test_env_prints_in_enumeration_order() {
        let env = Environment::from_vars([("ZED", "1"), ("ALPHA", "two words"), ("MID", "")]);
        let (flow, out) = run("env", &env);
        assert_eq!(flow, Some(Flow::Continue));
        assert_eq!(out, "ZED=1\nALPHA=two words\nMID=\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_env_writes_raw_bytes() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let env = Environment::from_vars([
            (OsString::from("RAW"), OsString::from_vec(vec![b'a', 0xff, b'b'])),
            (OsString::from("PLAIN"), OsString::from("x")),
        ]);
        let cmd = Command::parse("env", MAX_ARGS).unwrap();
        let mut out = Vec::new();
        Builtins::default().dispatch(&cmd, &mut out, &env).unwrap().unwrap();
        assert_eq!(out, b"RAW=a\xffb\nPLAIN=x\n");
    }

    #[test]
    fn test_env_ignores_arguments() {
        let env = Environment::from_vars([("A", "1")]);
        let (_, out) = run("env --help -0 B=2", &env);
        assert_eq!(out, "A=1\n");
    }

    #[test]
    fn test_unknown_name_is_not_builtin() {
        let (flow, out) = run("ls -l", &Environment::default());
        assert_eq!(flow, None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_match_is_exact() {
        assert_eq!(run("EXIT", &Environment::default()).0, None);
        assert_eq!(run("envx", &Environment::default()).0, None);
    }
}
