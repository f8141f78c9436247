//! Diagnostic tracing for the interpreter itself.
//!
//! Tracing is silent unless a filter is supplied, so that standard error only
//! carries the interpreter's user-facing diagnostics by default.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable read when no filter is given on the command line.
pub const LOG_ENV: &str = "HSH_LOG";

/// Filter used when neither the command line nor [`LOG_ENV`] sets one.
pub const DEFAULT_FILTER: &str = "off";

/// Pick the filter directive: explicit value, then [`LOG_ENV`], then [`DEFAULT_FILTER`].
pub fn filter_directive(explicit: Option<&str>) -> String {
    let non_blank = |s: &String| !s.trim().is_empty();
    explicit
        .map(str::to_owned)
        .filter(non_blank)
        .or_else(|| std::env::var(LOG_ENV).ok().filter(non_blank))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install a global `fmt` subscriber writing to standard error.
pub fn init(explicit: Option<&str>) -> Result<()> {
    let directive = filter_directive(explicit);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter: {directive}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("can't install log subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_wins() {
        assert_eq!(filter_directive(Some("debug")), "debug");
    }

    #[test]
    fn test_blank_filter_falls_back_to_env() {
        assert_eq!(filter_directive(Some("  ")), filter_directive(None));
    }

    #[test]
    fn test_bad_filter_is_rejected() {
        assert!(init(Some("hsh=notalevel")).is_err());
    }
}
