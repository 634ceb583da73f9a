use crate::core::icon::{self, IconResolver};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "xswap";
const APPLICATION: &str = "xswap";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PriceFeedConfig {
    pub url: String,
    /// Extra attempts after a failed fetch. The price list is fetched exactly
    /// once by default; any value other than 0 adds retries the swap form does
    /// not otherwise perform.
    pub retries: usize,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        PriceFeedConfig {
            url: "https://interview.switcheo.com/prices.json".to_string(),
            retries: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct IconConfig {
    pub base_url: String,
    pub fallback: String,
    pub aliases: HashMap<String, String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            base_url: icon::DEFAULT_ICON_BASE.to_string(),
            fallback: icon::DEFAULT_FALLBACK_ICON.to_string(),
            aliases: icon::default_aliases(),
        }
    }
}

impl IconConfig {
    pub fn resolver(&self) -> IconResolver {
        IconResolver::new(&self.base_url, &self.fallback, self.aliases.clone())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub prices: PriceFeedConfig,
    #[serde(default)]
    pub icons: IconConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SwapConfig {
    pub from: String,
    pub to: String,
    pub delay_ms: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        SwapConfig {
            from: "ETH".to_string(),
            to: "USDC".to_string(),
            delay_ms: 1500,
        }
    }
}

impl SwapConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub swap: SwapConfig,
}

impl AppConfig {
    /// Loads the config from the default location, or the built-in defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
