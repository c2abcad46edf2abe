use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` for this
/// crate and everything else stays at `warn`.
pub fn init(verbose: bool) -> Result<()> {
    let default = if verbose { "warn,safeeats=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}
