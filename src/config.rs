// src/config.rs

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ct_search::client::DEFAULT_API_ROOT;
use crate::ct_search::engine::DEFAULT_PAGE_LIMIT;

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_api_root")]
    pub api_root: String,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default)]
    pub include_expired: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,  // Per HTTP request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub strict_certificates: bool,
}

fn default_api_root() -> String { DEFAULT_API_ROOT.to_string() }
fn default_page_limit() -> u32 { DEFAULT_PAGE_LIMIT }
fn default_timeout_secs() -> u64 { 30 }
fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            page_limit: default_page_limit(),
            include_expired: false,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            strict_certificates: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.page_limit == 0 {
            anyhow::bail!("search.page_limit must be at least 1");
        }

        if self.search.timeout_secs == 0 {
            anyhow::bail!("search.timeout_secs must be greater than 0");
        }

        if url::Url::parse(&self.search.api_root).is_err() {
            anyhow::bail!("search.api_root is not a valid URL: {}", self.search.api_root);
        }

        Ok(())
    }
}
