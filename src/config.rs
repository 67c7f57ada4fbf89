use crate::error::{ExporterError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub exporter: ExporterConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExporterConfig {
    #[serde(with = "humantime_serde", default = "default_poll_interval")]
    pub poll_interval: Duration,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_http_host")]
    pub http_host: String,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub url: String,
    /// No timeout when unset: a hung upstream blocks that cycle, nothing else.
    #[serde(default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(15)
}

fn default_http_port() -> u16 {
    2112
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

impl Config {
    pub fn load(path: Option<&str>) -> Result<Config> {
        let config_path = path.unwrap_or("config.toml");

        if !Path::new(config_path).exists() {
            return Err(ExporterError::Config(format!(
                "Configuration file not found: {}",
                config_path
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let content = Self::substitute_env_vars(&content);

        let config: Config = toml::from_str(&content)
            .map_err(|e| ExporterError::Config(format!("TOML parse error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn substitute_env_vars(content: &str) -> String {
        // Supports:
        // - ${VAR} - replaced with env var value, empty string if not set
        // - ${VAR:-default} - replaced with env var value, or "default" if not set
        let re = Regex::new(r"\$\{\??([^}:-]+)(?::-([^}]*))?\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .to_string()
    }

    pub fn validate(&self) -> Result<()> {
        if self.upstream.url.is_empty() {
            return Err(ExporterError::Config(
                "upstream.url cannot be empty".to_string(),
            ));
        }

        if self.exporter.poll_interval.is_zero() {
            return Err(ExporterError::Config(
                "exporter.poll_interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
