use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the level picked from `verbose`. Logs go to stderr so
/// command output on stdout stays parseable (`--json`).
pub fn init_logging(verbose: bool) -> Result<()> {
  let level = if verbose { Level::DEBUG } else { Level::INFO };

  let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(verbose)
    .compact()
    .try_init()
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
