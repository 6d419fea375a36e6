//! Configuration management for gitfeed.
//!
//! Loads configuration from ${GITFEED_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the event feed server (overridable via GITFEED_BASE_URL)
    pub base_url: Option<String>,

    /// Seconds between poll cycles
    pub poll_interval_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Maximum number of events kept per cycle
    pub max_events: usize,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_MAX_EVENTS: usize = 50;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Poll interval as a `Duration`. Zero is clamped to one second so a
    /// misconfigured interval cannot spin the loop.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            poll_interval_secs: Self::DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            max_events: Self::DEFAULT_MAX_EVENTS,
        }
    }
}

/// Returns the default config file content with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for gitfeed configuration.
    //!
    //! GITFEED_HOME resolution order:
    //! 1. GITFEED_HOME environment variable (if set)
    //! 2. ~/.config/gitfeed (default)

    use std::path::PathBuf;

    /// Returns the gitfeed home directory.
    ///
    /// Checks GITFEED_HOME env var first, falls back to ~/.config/gitfeed
    pub fn gitfeed_home() -> PathBuf {
        if let Ok(home) = std::env::var("GITFEED_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("gitfeed"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        gitfeed_home().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, None);
        assert_eq!(config.poll_interval_secs, 15);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.max_events, 50);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "poll_interval_secs = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.max_events, Config::DEFAULT_MAX_EVENTS);
    }

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.poll_interval_secs, Config::DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(config.max_events, Config::DEFAULT_MAX_EVENTS);
    }

    #[test]
    fn init_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# existing").unwrap();

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = Config {
            poll_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }
}
