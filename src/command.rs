use crate::error::ShellError;
use crate::lexer::{self, DELIMITERS};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// One parsed invocation: the command name followed by its arguments.
///
/// A `Command` always holds at least one word, and `args()[0]` is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    /// Builds a command from a raw input line.
    ///
    /// The line terminator and leading whitespace are ignored. Returns `None`
    /// when nothing is left, meaning there is nothing to run. At most
    /// `max_args` words are kept.
    pub fn parse(line: &str, max_args: usize) -> Option<Self> {
        let line = line
            .trim_end_matches(['\n', '\r'])
            .trim_start_matches(DELIMITERS);
        if line.is_empty() {
            return None;
        }

        let mut tokens = lexer::split_words(line, DELIMITERS, max_args);
        let args: Vec<String> = tokens.by_ref().map(str::to_owned).collect();
        if tokens.truncated() {
            tracing::debug!(max_args, "extra arguments dropped");
        }
        if args.is_empty() {
            return None;
        }
        Some(Self { args })
    }

    /// Builds a command from words that are already split.
    ///
    /// Returns `None` for an empty word list or an empty name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let args: Vec<String> = args.into_iter().collect();
        match args.first() {
            Some(name) if !name.is_empty() => Some(Self { args }),
            _ => None,
        }
    }

    /// Name the command was invoked with.
    pub fn name(&self) -> &str {
        &self.args[0]
    }

    /// Full argument vector, name included.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of words, name included. Always at least 1.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// What happened to one input line.
#[derive(Debug)]
pub enum ExitOutcome {
    /// A builtin ran in-process.
    BuiltinHandled,
    /// An external program ran to completion with this status.
    ExternalExit(ExitCode),
    /// The command could not be started.
    ExecutionError(ShellError),
}

impl ExitOutcome {
    /// Status code the line leaves behind.
    pub fn status(&self) -> ExitCode {
        match self {
            ExitOutcome::BuiltinHandled => 0,
            ExitOutcome::ExternalExit(code) => *code,
            ExitOutcome::ExecutionError(err) => err.status(),
        }
    }
}
