// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::core::ANALYZE_ENDPOINT;
use crate::utils::normalize_language;
use crate::view::Labels;

pub const CONFIG_FILE: &str = "cvmatch.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub service_url: String,
    pub analyze_endpoint: String,
    pub timeout_seconds: u64,
    pub tick_interval_ms: u64,
    pub language: String,
    pub log_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:5000".to_string(),
            analyze_endpoint: ANALYZE_ENDPOINT.to_string(),
            timeout_seconds: 60,
            tick_interval_ms: 10,
            language: "en".to_string(),
            log_path: PathBuf::from("/tmp/cvmatch.log"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: Option<ClientConfig>,
    production: Option<ClientConfig>,
}

impl ClientConfig {
    /// Load configuration for the current environment, then apply env overrides
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        let config_path = PathBuf::from(CONFIG_FILE);

        let mut config = if config_path.exists() {
            info!("Loading {} for environment: {}", CONFIG_FILE, environment);
            Self::load_from_file(&config_path, &environment)?
        } else {
            info!("No {} found, using built-in defaults", CONFIG_FILE);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("CVMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Pick the `local` or `production` section; a missing section means defaults
    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        let section = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        let mut config = section.unwrap_or_default();
        config.language = normalize_language(Some(&config.language));
        Ok(config)
    }

    /// Apply `CV_SERVICE_URL` / `CVMATCH_LANG` style overrides from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CV_SERVICE_URL").filter(|url| !url.trim().is_empty()) {
            self.service_url = url;
        }
        if let Some(lang) = lookup("CVMATCH_LANG") {
            self.language = normalize_language(Some(&lang));
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn labels(&self) -> &'static Labels {
        Labels::for_language(&self.language)
    }
}
