//! Structured logging for the quorum network core.
//!
//! The output format and default filter come from [`QuorumnetConfig`]:
//! `log_format` selects human-readable lines or newline-delimited JSON,
//! and `log_level` seeds the filter (e.g. `"info"`,
//! `"debug,strobe_quorumnet=trace"`). A `RUST_LOG` environment variable
//! overrides the configured filter at runtime.

use crate::config::QuorumnetConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Anything other than (case-insensitive) `"json"` selects human output.
fn wants_json(log_format: &str) -> bool {
    log_format.eq_ignore_ascii_case("json")
}

/// Initialise the global tracing subscriber from the node's configuration.
///
/// Handlers run concurrently on transport threads, so thread ids are
/// included in both formats.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (i.e. this function
/// was called twice in the same process).
pub fn init_logging(config: &QuorumnetConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let base = tracing_subscriber::registry().with(filter);

    if wants_json(&config.log_format) {
        base.with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .init();
    } else {
        base.with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }
}
