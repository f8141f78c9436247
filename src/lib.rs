//! A tiny line-oriented command interpreter.
//!
//! Every input line is split into words, the first word names the command and
//! the rest are its arguments. Commands are either builtins executed in-process
//! (`exit`, `env`) or external programs found through `PATH`, spawned as a
//! child process and waited for.
//!
//! The main entry point is [`Interpreter`], which evaluates one line at a time
//! with [`Interpreter::execute_line`] or drives a whole input stream with
//! [`Interpreter::run_stream`] and [`Interpreter::repl`].

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod external;
mod interpreter;
mod lexer;
pub mod logging;

pub use command::{Command, ExitCode, ExitOutcome};
pub use config::Config;
pub use external::{find_command_path, is_executable};

/// Just a convenient re-export of the line interpreter.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
