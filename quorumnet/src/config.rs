//! Quorum network configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::error::QuorumnetError;

/// Configuration for the quorum network core.
///
/// Can be loaded from a TOML file via [`QuorumnetConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Consensus-critical values (quorum
/// sizes, vote thresholds, the height acceptance window) are protocol
/// constants in `strobe_types::params`, not configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuorumnetConfig {
    /// Accept blink submissions from non-service-node clients. When false,
    /// only authenticated service nodes can reach the `blink` command.
    #[serde(default = "default_true")]
    pub accept_client_submissions: bool,

    /// How many quorum members a local submission is fanned out to.
    #[serde(default = "default_submit_fanout")]
    pub submit_fanout: usize,

    /// Seconds before a pending submission resolves as timed out.
    #[serde(default = "default_submit_timeout_secs")]
    pub submit_timeout_secs: u64,

    /// Cap on concurrently pending local submissions.
    #[serde(default = "default_max_active_promises")]
    pub max_active_promises: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_submit_fanout() -> usize {
    4
}

fn default_submit_timeout_secs() -> u64 {
    30
}

fn default_max_active_promises() -> usize {
    1000
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl QuorumnetConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, QuorumnetError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| QuorumnetError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, QuorumnetError> {
        toml::from_str(s).map_err(|e| QuorumnetError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("QuorumnetConfig is always serializable to TOML")
    }
}

impl Default for QuorumnetConfig {
    fn default() -> Self {
        Self {
            accept_client_submissions: default_true(),
            submit_fanout: default_submit_fanout(),
            submit_timeout_secs: default_submit_timeout_secs(),
            max_active_promises: default_max_active_promises(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
