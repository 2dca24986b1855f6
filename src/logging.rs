//! Logging configuration using tracing
//!
//! All output goes to stderr: stdout belongs to the stdio MCP transport and
//! must carry nothing but protocol frames.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Filtering follows the RUST_LOG environment variable, defaulting to "info"
/// so cache hits, misses, and sweeps are visible in server logs.
///
/// # Errors
/// Returns an error if a subscriber has already been initialized
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init();
}
