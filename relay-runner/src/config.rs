//! Runner configuration
//!
//! Loaded once at startup from a YAML file. `${VAR}` placeholders anywhere
//! in the file are replaced from the process environment before parsing, so
//! deployment secrets like the API URL can stay out of the file itself.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Config file looked up when `-c` is not given
pub const DEFAULT_CONFIG_PATH: &str = "relay.conf.yml";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the dispatch loop
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Number of concurrent workers draining the task channel
    pub worker_count: usize,

    /// Delay between polls when the queue is empty; also the worker idle
    /// sleep
    pub poll_interval_ms: u64,

    /// Base URL of the scheduling API (e.g., "http://localhost:8080")
    pub api_url: String,

    /// Timeout applied to every API request
    pub request_timeout_secs: u64,
}

impl SchedulerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it
    pub level: String,
    /// ANSI colors in log output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

impl Config {
    /// Loads and validates the configuration file
    ///
    /// A missing or invalid file is fatal; the runner refuses to start with
    /// a guessed configuration.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let interpolated = interpolate_env(&raw);

        let config: Config = serde_yaml::from_str(&interpolated)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.scheduler.worker_count == 0 {
            anyhow::bail!("scheduler.worker_count must be at least 1");
        }

        if self.scheduler.poll_interval_ms == 0 {
            anyhow::bail!("scheduler.poll_interval_ms must be greater than 0");
        }

        if self.scheduler.request_timeout_secs == 0 {
            anyhow::bail!("scheduler.request_timeout_secs must be greater than 0");
        }

        if self.scheduler.api_url.is_empty() {
            anyhow::bail!("scheduler.api_url cannot be empty");
        }

        if !self.scheduler.api_url.starts_with("http://")
            && !self.scheduler.api_url.starts_with("https://")
        {
            anyhow::bail!("scheduler.api_url must start with http:// or https://");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig {
                worker_count: 4,
                poll_interval_ms: 5000,
                api_url: "http://localhost:8080".to_string(),
                request_timeout_secs: 30,
            },
            logging: LoggingConfig::default(),
        }
    }
}

/// Replaces `${VAR}` placeholders with values from the process environment
fn interpolate_env(raw: &str) -> String {
    interpolate(raw, std::env::vars())
}

fn interpolate(raw: &str, vars: impl Iterator<Item = (String, String)>) -> String {
    let mut text = raw.to_string();
    for (key, value) in vars {
        text = text.replace(&format!("${{{key}}}"), &value);
    }
    text
}
