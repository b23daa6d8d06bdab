//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::zoopla::models::SearchParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the for-sale search (overridable for testing)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output file for the collected prices
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Postcode or outcode to search around
    #[serde(default)]
    pub postcode: String,

    /// Filter: minimum asking price in pounds
    #[serde(default)]
    pub price_min: Option<u64>,

    /// Filter: maximum asking price in pounds
    #[serde(default)]
    pub price_max: Option<u64>,

    /// Filter: minimum number of bedrooms
    #[serde(default)]
    pub beds_min: Option<u32>,

    /// Filter: maximum number of bedrooms
    #[serde(default)]
    pub beds_max: Option<u32>,

    /// Search radius in miles
    #[serde(default)]
    pub radius: u32,
}

fn default_base_url() -> String {
    "https://www.zoopla.co.uk/for-sale/property".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("prices.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            output: default_output(),
            postcode: String::new(),
            price_min: None,
            price_max: None,
            beds_min: None,
            beds_max: None,
            radius: 0,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("zoopla-prices").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("ZOOPLA_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(proxy) = std::env::var("ZOOPLA_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }

    /// Returns the search parameters carried into each page request.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            postcode: self.postcode.clone(),
            price_min: self.price_min,
            price_max: self.price_max,
            beds_min: self.beds_min,
            beds_max: self.beds_max,
            radius: self.radius,
        }
    }
}
