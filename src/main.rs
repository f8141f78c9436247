use argh::{EarlyExit, FromArgs};
use is_terminal::IsTerminal;
use simple_shell::config::MAX_ARGS;
use simple_shell::{Config, Interpreter, logging};

#[derive(FromArgs)]
/// A simple command interpreter. Reads one command per line from standard input.
struct Options {
    #[argh(option, default = "MAX_ARGS")]
    /// maximum number of words kept from each line; extra words are dropped.
    max_args: usize,

    #[argh(option)]
    /// tracing filter, e.g. `debug`; defaults to $HSH_LOG, otherwise off.
    log_level: Option<String>,
}

/// Program name and parsed options. Arguments that are not valid Unicode are
/// converted lossily rather than rejected.
fn parse_args() -> (String, Options) {
    let mut args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let program_name = args.next().unwrap_or_else(|| "hsh".to_string());
    let rest: Vec<String> = args.collect();
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    let parsed = Options::from_args(&[program_name.as_str()], &rest);
    match parsed {
        Ok(options) => (program_name, options),
        Err(EarlyExit { output, status }) => match status {
            Ok(()) => {
                println!("{output}");
                std::process::exit(0)
            }
            Err(()) => {
                eprintln!("{output}");
                std::process::exit(1)
            }
        },
    }
}

fn main() -> anyhow::Result<()> {
    let (program_name, options) = parse_args();
    logging::init(options.log_level.as_deref())?;

    let interactive = std::io::stdin().is_terminal();
    let config = Config::new(program_name, interactive).with_max_args(options.max_args.max(1));
    tracing::debug!(?config, "starting");

    let status = Interpreter::new(config).run()?;
    std::process::exit(status)
}
