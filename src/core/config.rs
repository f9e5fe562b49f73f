use super::currency::Currency;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_HGBRASIL_URL: &str = "https://api.hgbrasil.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HgBrasilProviderConfig {
    #[serde(default = "default_hgbrasil_url")]
    pub base_url: String,
    #[serde(default)]
    pub key: Option<String>,
}

fn default_hgbrasil_url() -> String {
    DEFAULT_HGBRASIL_URL.to_string()
}

impl Default for HgBrasilProviderConfig {
    fn default() -> Self {
        HgBrasilProviderConfig {
            base_url: default_hgbrasil_url(),
            key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub hgbrasil: Option<HgBrasilProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            hgbrasil: Some(HgBrasilProviderConfig::default()),
        }
    }
}

/// Initial values for the converter inputs.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default = "default_from")]
    pub from: Currency,
    #[serde(default = "default_to")]
    pub to: Currency,
}

fn default_amount() -> String {
    "1".to_string()
}

fn default_from() -> Currency {
    Currency::BRL
}

fn default_to() -> Currency {
    Currency::USD
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            amount: default_amount(),
            from: default_from(),
            to: default_to(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "cambio", "cambio")
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

    pub fn hgbrasil(&self) -> HgBrasilProviderConfig {
        self.providers.hgbrasil.clone().unwrap_or_default()
    }
}
