//! Diagnostics go to stderr through `tracing`; stdout carries only command
//! output.
//!
//! Level precedence: `RUST_LOG`, then `-v` count, then `[log] level` from
//! the config file.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 6] = [
    "blockdoc",
    "blockdoc_core",
    "blockdoc_engine",
    "blockdoc_codec",
    "blockdoc_input",
    "blockdoc_io",
];

/// - 0 (no `-v`): the configured level
/// - 1 (`-v`): info
/// - 2 (`-vv`): debug
/// - 3+: trace
pub fn level_for(verbosity: u8, configured: &str) -> Result<Level, String> {
    match verbosity {
        0 => configured
            .parse::<Level>()
            .map_err(|_| format!("unknown log level `{configured}`")),
        1 => Ok(Level::INFO),
        2 => Ok(Level::DEBUG),
        _ => Ok(Level::TRACE),
    }
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init_logging(level: Level) -> anyhow::Result<()> {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .try_init()?;
    Ok(())
}

/// External crates stay at warn unless `RUST_LOG` says otherwise.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        let mut directives = String::from("warn");
        for krate in CRATES {
            directives.push_str(&format!(",{krate}={level}"));
        }
        EnvFilter::new(directives)
    })
}
