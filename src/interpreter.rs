use crate::builtin::{Builtins, Flow};
use crate::command::{Command, ExitCode, ExitOutcome};
use crate::config::{Config, PROMPT};
use crate::env::Environment;
use crate::error::{self, ShellError};
use crate::external::ExternalCommand;
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

/// A minimal line interpreter running builtins and external programs.
///
/// The interpreter holds the startup [`Config`], a snapshot of the inherited
/// [`Environment`] and the builtin table. Apart from the line counter used in
/// diagnostics and the status of the last line, nothing carries over from
/// one line to the next.
///
/// Example
/// ```
/// use simple_shell::{Config, Interpreter};
/// let mut sh = Interpreter::new(Config::default());
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let outcome = sh.execute_line("/bin/echo hello", &mut out, &mut err).unwrap();
/// assert_eq!(outcome.status(), 0);
/// ```
pub struct Interpreter {
    config: Config,
    env: Environment,
    builtins: Builtins,
    line_number: usize,
    last_status: ExitCode,
    exit_requested: Option<ExitCode>,
}

impl Interpreter {
    /// Create an interpreter over the current process environment.
    pub fn new(config: Config) -> Self {
        Self::with_env(config, Environment::new())
    }

    /// Create an interpreter over an explicit environment.
    pub fn with_env(config: Config, env: Environment) -> Self {
        Self {
            config,
            env,
            builtins: Builtins::default(),
            line_number: 0,
            last_status: 0,
            exit_requested: None,
        }
    }

    /// Settings this interpreter was started with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Status of the most recent non-empty line, 0 before any.
    pub fn last_status(&self) -> ExitCode {
        self.last_status
    }

    /// Whether `exit` has been run.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.is_some()
    }

    /// Run one input line.
    ///
    /// Returns `None` for a blank line. Builtin output goes to `stdout`,
    /// diagnostics to `stderr`; external programs inherit the process streams.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Option<ExitOutcome> {
        self.line_number += 1;
        let cmd = Command::parse(line, self.config.max_args)?;
        tracing::debug!(line = self.line_number, name = cmd.name(), argc = cmd.arg_count(), "command");

        let outcome = match self.builtins.dispatch(&cmd, stdout, &self.env) {
            Some(result) => {
                match result {
                    Ok(Flow::Exit(code)) => self.exit_requested = Some(code),
                    Ok(Flow::Continue) => {}
                    Err(e) => tracing::warn!(name = cmd.name(), error = %e, "builtin output failed"),
                }
                ExitOutcome::BuiltinHandled
            }
            None => {
                let _ = stdout.flush();
                self.run_external(&cmd, stderr)
            }
        };
        self.last_status = outcome.status();
        Some(outcome)
    }

    fn run_external(&self, cmd: &Command, stderr: &mut dyn Write) -> ExitOutcome {
        let search_paths = self.env.get_var("PATH");
        let result = ExternalCommand::try_create(search_paths, cmd).and_then(|ext| {
            tracing::debug!(program = %ext.program().display(), "resolved");
            ext.execute(&self.env)
        });
        match result {
            Ok(code) => ExitOutcome::ExternalExit(code),
            Err(e) => {
                self.report(stderr, cmd, &e);
                match e {
                    ShellError::Exec(_) => ExitOutcome::ExternalExit(e.status()),
                    e => ExitOutcome::ExecutionError(e),
                }
            }
        }
    }

    fn report(&self, stderr: &mut dyn Write, cmd: &Command, err: &ShellError) {
        error::report(
            stderr,
            &self.config.program_name,
            self.line_number,
            cmd.name(),
            err,
        );
    }

    /// Run every line of `input` until end of input or `exit`.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    ///
    /// Returns the status to leave the process with: 0 after `exit`, otherwise
    /// the status of the last line.
    pub fn run_stream(
        &mut self,
        input: &mut dyn BufRead,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = input.read_until(b'\n', &mut buf).context("can't read input")?;
            if read == 0 {
                tracing::debug!("end of input");
                return Ok(self.last_status);
            }
            let line = String::from_utf8_lossy(&buf);
            self.execute_line(&line, stdout, stderr);
            if let Some(code) = self.exit_requested {
                return Ok(code);
            }
        }
    }

    /// Interactive Read-Eval-Print Loop showing a prompt before each line.
    ///
    /// Ctrl-C drops the current line; Ctrl-D ends the loop.
    pub fn repl(&mut self) -> anyhow::Result<ExitCode> {
        let mut rl = DefaultEditor::new().context("can't initialize line editor")?;

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    self.execute_line(&line, &mut io::stdout(), &mut io::stderr());
                    if let Some(code) = self.exit_requested {
                        return Ok(code);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    println!();
                    return Ok(self.last_status);
                }
                Err(err) => return Err(err).context("can't read input"),
            }
        }
    }

    /// Drive the interpreter from standard input in the mode chosen at startup.
    pub fn run(&mut self) -> anyhow::Result<ExitCode> {
        if self.config.interactive {
            self.repl()
        } else {
            let stdin = io::stdin();
            self.run_stream(&mut stdin.lock(), &mut io::stdout(), &mut io::stderr())
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
