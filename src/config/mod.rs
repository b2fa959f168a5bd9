//! Configuration management for gazette.
//!
//! Configuration is read from `~/.config/gazette/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub tui: TuiConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://actus.mascodeproduct.com/api".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// TUI behavior settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event-loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Seconds each featured article stays on the banner before rotating.
    pub carousel_interval_secs: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            carousel_interval_secs: 5,
        }
    }
}

impl TuiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// How many ticks one carousel slide lasts.
    pub fn carousel_ticks_per_slide(&self) -> u32 {
        let ms = self.carousel_interval_secs.saturating_mul(1000);
        (ms / self.tick_rate_ms.max(1)).max(1) as u32
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Gazette Configuration

[api]
# Base URL of the news platform API
base_url = "https://actus.mascodeproduct.com/api"

# Request timeout in seconds
timeout_secs = 10

[tui]
# Event-loop tick rate in milliseconds
tick_rate_ms = 100

# Seconds each featured article stays on the banner
carousel_interval_secs = 5
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.base_url, "https://actus.mascodeproduct.com/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.tui.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
base_url = "http://localhost:8000/api"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom value
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        // Default values
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.tui.carousel_interval_secs, 5);
    }

    #[test]
    fn test_empty_config() {
        let content = "";
        let config: Config = toml::from_str(content).expect("Empty config should work");

        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.tui.tick_rate_ms, 100);
    }

    #[test]
    fn test_carousel_ticks_per_slide() {
        let tui = TuiConfig {
            tick_rate_ms: 100,
            carousel_interval_secs: 5,
        };
        assert_eq!(tui.carousel_ticks_per_slide(), 50);
    }
}
