//! Logging bootstrap shared by every binary
//!
//! Logs go to stderr so they never interleave with the menu UI on stdout.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default level for interactive tools (quiet unless something goes wrong)
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Setup logging with tracing
///
/// `level` seeds the default directive; `RUST_LOG` still overrides it.
/// Unknown level strings fall back to [`DEFAULT_LOG_LEVEL`].
pub fn setup_logging(level: &str) {
    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy();

    // try_init: a second call (e.g. from tests) must not panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn parse_level(level: &str) -> Level {
    level.parse::<Level>().unwrap_or(Level::WARN)
}
