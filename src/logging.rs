//! Logging setup for the command-line tool.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to binaries.
//!
//! - `info`: dictionary loading
//! - `debug`: per-document outcome counts
//! - `trace`: individual corrections and segmentations

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map a `-v` count to a level: warn, info, debug, trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr subscriber. `RUST_LOG` overrides `level` when set.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(level: Level) -> Result<(), tracing_subscriber::util::TryInitError> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .try_init()
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // our crate at the requested level, dependencies stay quiet
        EnvFilter::new(format!("warn,lexnorm={}", level.as_str().to_lowercase()))
    })
}
