//! Terminal logger setup.

use anyhow::{Context, Result};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Pick the log level from the command-line flags, falling back to the
/// manifest's `[log] level`, then to `warn`.
pub fn level(verbose: u8, quiet: bool, configured: Option<&str>) -> Result<LevelFilter> {
    if quiet {
        return Ok(LevelFilter::Off);
    }
    Ok(match verbose {
        0 => match configured {
            Some(name) => name
                .parse()
                .with_context(|| format!("invalid log level '{name}' in manifest"))?,
            None => LevelFilter::Warn,
        },
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    })
}

/// Install the stderr logger.
pub fn configure_logging(level: LevelFilter) -> Result<()> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("installing logger")
}
