use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::RiskLevel;

/// Root configuration structure, deserialized from `.safeeats/config.toml`.
///
/// Every section and field is optional; missing values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where product data is fetched from.
    pub source: SourceConfig,
    /// Scan result cache.
    pub cache: CacheConfig,
    /// Exit-code policy.
    pub policy: PolicyConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Product endpoint; `/{barcode}.json` is appended.
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://world.openfoodfacts.org/api/v2/product".to_string(),
            timeout_secs: 10,
            user_agent: concat!("safeeats/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Entries older than this are treated as absent.
    pub ttl_hours: u64,
    /// Cache file. Defaults to `<cache dir>/safeeats/scan-cache.json`.
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_hours: 24,
            path: None,
        }
    }
}

impl CacheConfig {
    /// Entry lifetime. Oversized `ttl_hours` values saturate.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }

    /// Resolve the cache file location, or `None` if no cache dir is known.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        dirs::cache_dir().map(|dir| dir.join("safeeats").join("scan-cache.json"))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Exit with code 1 when any product's overall risk reaches this level.
    pub fail_on: Option<RiskLevel>,
}

impl PolicyConfig {
    pub fn violated_by(&self, risk: RiskLevel) -> bool {
        self.fail_on.is_some_and(|threshold| risk >= threshold)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.safeeats/config.toml`
/// 3. `~/.config/safeeats/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = working_dir.join(".safeeats").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("safeeats").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config: {}", path.display()))
}
