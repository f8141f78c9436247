/// Upper bound on the number of words kept from one input line.
pub const MAX_ARGS: usize = 64;

/// Prompt shown before each line in interactive mode.
pub const PROMPT: &str = "($) ";

/// Settings fixed once at startup and shared by every line the interpreter runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name the interpreter was invoked as (`argv[0]`), used as the diagnostic prefix.
    pub program_name: String,
    /// Whether standard input is a terminal. Gates the prompt and line editor.
    pub interactive: bool,
    /// Words beyond this count are dropped from a line.
    pub max_args: usize,
}

impl Config {
    pub fn new(program_name: impl Into<String>, interactive: bool) -> Self {
        Self {
            program_name: program_name.into(),
            interactive,
            max_args: MAX_ARGS,
        }
    }

    pub fn with_max_args(mut self, max_args: usize) -> Self {
        self.max_args = max_args;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("hsh", false)
    }
}
