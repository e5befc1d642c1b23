//! Configuration file loading.
//!
//! Looks for `--config <path>`, then `<config_dir>/aegis/config.toml`; a missing
//! default file means built-in defaults. `API_KEY` from the environment
//! overrides `advisory.api_key`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use aegis_core::config::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use aegis_core::{AdvisoryConfig, PacingConfig};
use aegis_provider::{GeoLookupOptions, HttpClientOptions, ProviderKind};
use anyhow::Context;
use serde::Deserialize;

/// Environment variable holding the advisory API key.
pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub advisory: AdvisorySection,
    pub geo: GeoSection,
    pub pacing: PacingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisorySection {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeoSection {
    pub primary_url: String,
    pub secondary_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingSection {
    pub initializing_ms: u64,
    pub min_fetch_ms: u64,
    pub analyzing_ms: u64,
    pub complete_ms: u64,
}

impl Default for AdvisorySection {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for GeoSection {
    fn default() -> Self {
        let http = HttpClientOptions::default();
        Self {
            primary_url: ProviderKind::IpWhois.default_url().to_string(),
            secondary_url: ProviderKind::IpApi.default_url().to_string(),
            connect_timeout_secs: http.connect_timeout.as_secs(),
            request_timeout_secs: http.request_timeout.as_secs(),
        }
    }
}

impl Default for PacingSection {
    fn default() -> Self {
        Self::from(PacingConfig::default())
    }
}

impl From<PacingConfig> for PacingSection {
    fn from(p: PacingConfig) -> Self {
        let ms = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            initializing_ms: ms(p.initializing),
            min_fetch_ms: ms(p.min_fetch),
            analyzing_ms: ms(p.analyzing),
            complete_ms: ms(p.complete),
        }
    }
}

impl AppConfig {
    /// Load the config file and apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.override_with_env(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        tracing::debug!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A non-blank `API_KEY` replaces the file's key.
    pub fn override_with_env(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using advisory API key from {API_KEY_ENV}");
            self.advisory.api_key = Some(key);
        }
    }

    pub fn advisory_config(&self) -> AdvisoryConfig {
        AdvisoryConfig {
            api_key: self.advisory.api_key.clone(),
            model: self.advisory.model.clone(),
            temperature: self.advisory.temperature,
            endpoint: self.advisory.endpoint.clone(),
        }
    }

    pub fn geo_options(&self) -> GeoLookupOptions {
        GeoLookupOptions {
            primary_url: self.geo.primary_url.clone(),
            secondary_url: self.geo.secondary_url.clone(),
            http: HttpClientOptions {
                connect_timeout: Duration::from_secs(self.geo.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.geo.request_timeout_secs),
            },
        }
    }

    pub fn pacing_config(&self) -> PacingConfig {
        PacingConfig {
            initializing: Duration::from_millis(self.pacing.initializing_ms),
            min_fetch: Duration::from_millis(self.pacing.min_fetch_ms),
            analyzing: Duration::from_millis(self.pacing.analyzing_ms),
            complete: Duration::from_millis(self.pacing.complete_ms),
        }
    }
}

/// `<config_dir>/aegis/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("aegis").join("config.toml"))
}
