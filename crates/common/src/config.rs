use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::drop_cache::DEFAULT_DROP_CACHES_PATH;
use crate::meminfo::DEFAULT_MEMINFO_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/kram/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KramConfig {
    /// Display language tag; resolved (with fallback) by `Lang::resolve`.
    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub daemon: DaemonConfig,
}

impl Default for KramConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            paths: PathsConfig::default(),
            daemon: DaemonConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_meminfo")]
    pub meminfo: PathBuf,

    #[serde(default = "default_drop_caches")]
    pub drop_caches: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            meminfo: default_meminfo(),
            drop_caches: default_drop_caches(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Seconds to sleep between cache drops.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl DaemonConfig {
    /// The sleep between drops; an interval of zero is an error.
    pub fn interval(&self) -> Result<Duration> {
        if self.interval_secs == 0 {
            anyhow::bail!("daemon.interval_secs must be at least 1");
        }
        Ok(Duration::from_secs(self.interval_secs))
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self { interval_secs: default_interval_secs() }
    }
}

fn default_lang() -> String { "en".into() }
fn default_meminfo() -> PathBuf { DEFAULT_MEMINFO_PATH.into() }
fn default_drop_caches() -> PathBuf { DEFAULT_DROP_CACHES_PATH.into() }
fn default_interval_secs() -> u64 { 10 }

/// Parse a config file body, warning about keys that are not recognised.
pub fn parse_config(text: &str) -> Result<KramConfig> {
    let (config, unknown) = parse_config_collect_unknown(text)?;
    for key in &unknown {
        tracing::warn!("unknown config key ignored: {key}");
    }
    Ok(config)
}

fn parse_config_collect_unknown(text: &str) -> Result<(KramConfig, Vec<String>)> {
    let mut unknown = Vec::new();
    let config: KramConfig = serde_ignored::deserialize(toml::Deserializer::new(text), |path| {
        unknown.push(path.to_string());
    })
    .context("parsing config")?;
    Ok((config, unknown))
}

/// The file [`load_config`] will read: the explicit path, else
/// [`DEFAULT_CONFIG_PATH`] when it exists, else none.
pub fn config_source(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            default.exists().then(|| default.to_path_buf())
        }
    }
}

/// Load the effective configuration.
///
/// An explicit path must be readable. Without one, [`DEFAULT_CONFIG_PATH`]
/// is used when it exists and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<KramConfig> {
    let Some(path) = config_source(explicit) else {
        tracing::debug!("no config at {DEFAULT_CONFIG_PATH}, using defaults");
        return Ok(KramConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}
