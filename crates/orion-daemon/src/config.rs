// crates/orion-daemon/src/config.rs
//
// Runtime configuration for the ORION daemon.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

use orion_consensus::{AggregatorConfig, ChainMode, UnknownTheoryPolicy};
use orion_core::OrionError;
use orion_theories::{ScoringStrategy, TheoryRegistry};

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Host address for the RPC server.
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    /// Port for the RPC server.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How evaluators draw their raw quantity.
    #[serde(default)]
    pub scoring_strategy: ScoringStrategy,

    /// Whether unregistered names in a theory filter fail the call.
    #[serde(default)]
    pub unknown_theories: UnknownTheoryPolicy,

    /// Proof chain mode.
    #[serde(default)]
    pub chain_mode: ChainMode,

    /// Built-in theories to register, in order. All of them when absent.
    #[serde(default)]
    pub theories: Option<Vec<String>>,
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    50061
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            rpc_host: default_rpc_host(),
            rpc_port: default_rpc_port(),
            log_level: default_log_level(),
            scoring_strategy: ScoringStrategy::default(),
            unknown_theories: UnknownTheoryPolicy::default(),
            chain_mode: ChainMode::default(),
            theories: None,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: DaemonConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Build the theory registry this configuration describes.
    pub fn registry(&self) -> Result<TheoryRegistry, OrionError> {
        match &self.theories {
            Some(keys) => TheoryRegistry::with_builtins(keys.as_slice(), self.scoring_strategy),
            None => Ok(TheoryRegistry::with_defaults(self.scoring_strategy)),
        }
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            unknown_theories: self.unknown_theories,
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).display().to_string();
        }
    }
    path.to_string()
}
