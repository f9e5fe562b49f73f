use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const VERBOSE_DIRECTIVE: &str = "cambio=debug";

/// `RUST_LOG` (or nothing) as the base, with debug output for this crate on
/// top when `verbose` is set.
pub fn log_filter(verbose: bool) -> Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    if !verbose {
        return Ok(filter);
    }
    let directive = VERBOSE_DIRECTIVE
        .parse()
        .context("Invalid verbose log directive")?;
    Ok(filter.add_directive(directive))
}

/// Installs the global subscriber, writing to stderr so command output on
/// stdout stays clean.
pub fn init_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(log_filter(verbose)?)
        .try_init()
        .context("Failed to install log subscriber")
}
