//! Runtime configuration for the flight source.
//!
//! Stored optionally as a JSON file:
//! ```json
//! {
//!   "api_base_url": "https://schedules.example.com/api",
//!   "api_key_header": "x-api-key",
//!   "timeout_secs": 20
//! }
//! ```
//! Environment variables (`FLIGHTS_API_URL`, `FLIGHTS_API_KEY`,
//! `FLIGHTS_API_KEY_HEADER`, `FLIGHTS_TIMEOUT_SECS`) take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub api_key_header: String,
    /// Upper bound on one acquisition, including retries inside the source.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            api_key: None,
            api_key_header: "x-api-key".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Loads the optional JSON file at `path`, then applies environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{path}'"))?;
        serde_json::from_str(&content).with_context(|| format!("invalid config file '{path}'"))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("FLIGHTS_API_URL") {
            self.api_base_url = url;
        }
        if let Some(key) = lookup("FLIGHTS_API_KEY").filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(header) = lookup("FLIGHTS_API_KEY_HEADER") {
            self.api_key_header = header;
        }
        if let Some(secs) = lookup("FLIGHTS_TIMEOUT_SECS") {
            self.timeout_secs = secs
                .parse()
                .with_context(|| format!("FLIGHTS_TIMEOUT_SECS is not a number: '{secs}'"))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
