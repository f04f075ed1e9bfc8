use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_LOG_LINES: usize = 50;

/// Client settings. Only `api_base` is normally set from outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,

    /// Poll cadence in milliseconds. The cadence is the only retry policy.
    pub poll_interval_ms: u64,

    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Lines requested from `/logs`.
    pub log_lines: usize,

    /// Desktop notification permission. `None` means undetermined: decided the
    /// first time a machine finishes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop_notifications: Option<bool>,

    /// Ring the terminal bell on completion.
    pub bell: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval_ms: 1000,
            request_timeout_ms: 5000,
            log_lines: DEFAULT_LOG_LINES,
            desktop_notifications: None,
            bell: true,
        }
    }
}

impl ClientConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config {}", path.display()))?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg.normalized()
    }

    /// Layer an externally injected base URL (env or flag) over this config.
    pub fn with_api_base(mut self, api_base: Option<String>) -> Result<Self> {
        if let Some(base) = api_base {
            self.api_base = base;
        }
        self.normalized()
    }

    fn normalized(mut self) -> Result<Self> {
        let base = self.api_base.trim().trim_end_matches('/').to_string();
        if base.is_empty() {
            anyhow::bail!("api base url must not be empty");
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            anyhow::bail!("api base url must start with http:// or https:// (got {})", base);
        }
        self.api_base = base;
        if self.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms must be greater than zero");
        }
        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
