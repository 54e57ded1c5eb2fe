//! Configuration loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server endpoint.
    pub server: ServerConfig,
    /// Who we register as.
    pub identity: IdentityConfig,
    /// The one channel we join.
    pub channel: ChannelConfig,
    /// Polling timeouts.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host name (e.g., "irc.chat.twitch.tv").
    pub host: String,
    /// Plaintext IRC port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connection password (for Twitch, an "oauth:..." token).
    /// Absent or empty means no PASS line is sent.
    pub password: Option<String>,
}

/// Registration identity.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Nickname to register.
    pub nick: String,
    /// Username (ident). Defaults to the nick.
    #[serde(default)]
    pub user: Option<String>,
}

impl IdentityConfig {
    /// The username to register, falling back to the nick.
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(&self.nick)
    }
}

/// Channel configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Channel to join, including the leading `#`.
    pub name: String,
}

/// Polling timeout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutsConfig {
    /// Per-attempt receive timeout in milliseconds (default: 1000).
    /// Also the effective pacing of the poll loop when the server is idle.
    #[serde(default = "default_recv_timeout_ms")]
    pub recv_timeout_ms: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            recv_timeout_ms: default_recv_timeout_ms(),
        }
    }
}

fn default_port() -> u16 {
    6667
}

fn default_recv_timeout_ms() -> u64 {
    1000
}
