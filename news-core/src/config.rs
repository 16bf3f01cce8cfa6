use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::NewsError;
use crate::generator::GeneratorConfig;

pub const CONFIG_ENV: &str = "NEWSFEED_CONFIG";
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub streams: StreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub slow_delay_ms: u64,
    pub backpressure_interval_ms: u64,
    pub backpressure_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            slow_delay_ms: 1_000,
            backpressure_interval_ms: 100,
            backpressure_buffer: 10,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StreamConfig {
    pub fn slow_delay(&self) -> Duration {
        Duration::from_millis(self.slow_delay_ms)
    }

    pub fn backpressure_interval(&self) -> Duration {
        Duration::from_millis(self.backpressure_interval_ms)
    }
}

impl AppConfig {
    /// `$NEWSFEED_CONFIG`, or `<config dir>/newsfeed/config.json`.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("newsfeed").join("config.json"))
    }

    /// Loads the configuration file if there is one, falling back to defaults,
    /// then applies the `PORT` override.
    pub fn load() -> Self {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from_file(&path).unwrap_or_else(|err| {
                warn!(error = %err, path = %path.display(), "failed to load config, using defaults");
                Self::default()
            }),
            _ => {
                info!("no config file found, using defaults");
                Self::default()
            }
        };
        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref());
        config
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, NewsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        info!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    pub fn apply_port_override(&mut self, port: Option<&str>) {
        let Some(raw) = port else { return };
        match raw.trim().parse::<u16>() {
            Ok(port) => self.server.port = port,
            Err(err) => warn!(error = %err, value = raw, "ignoring invalid PORT"),
        }
    }
}
