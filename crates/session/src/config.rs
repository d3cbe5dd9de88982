//! Server settings, loaded from TOML

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Settings for the session server and the AI worker.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the TCP bridge listens on
    pub bind_addr: String,
    /// Length of generated room codes
    pub room_code_len: usize,
    /// Pause between a guest joining and the match-start notice
    pub match_start_delay_ms: u64,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Artificial "thinking" pause before each computer move
    pub think_delay_ms: u64,
    /// Seed for the easy tier's randomness; random if unset
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7878".to_string(),
            room_code_len: 5,
            match_start_delay_ms: 500,
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: 400,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn match_start_delay(&self) -> Duration {
        Duration::from_millis(self.match_start_delay_ms)
    }

    /// Settings with every delay zeroed, for tests.
    pub fn instant() -> Self {
        Self {
            match_start_delay_ms: 0,
            ai: AiConfig {
                think_delay_ms: 0,
                seed: Some(0),
            },
            ..Self::default()
        }
    }
}

impl AiConfig {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}
