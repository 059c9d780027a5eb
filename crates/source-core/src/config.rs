//! Client configuration.
//!
//! `SourceConfiguration` is what the client and token generator are built
//! from. It can be assembled directly, from environment variables, or from
//! the saved `Config` file plus the OS keychain.
//!
//! The config file is stored at `~/.config/source/config.json` and never
//! holds secrets.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{Authentication, CredentialStore};

/// Application name used for config directory paths
const APP_NAME: &str = "source";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.sourcehealth.com";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY_ID: &str = "SOURCE_API_KEY_ID";
pub const ENV_API_KEY_SECRET: &str = "SOURCE_API_KEY_SECRET";
pub const ENV_TOKEN: &str = "SOURCE_TOKEN";
pub const ENV_BASE_URL: &str = "SOURCE_BASE_URL";

/// Everything needed to talk to the Source API.
#[derive(Debug, Clone)]
pub struct SourceConfiguration {
    pub base_url: String,
    pub authentication: Authentication,
    pub timeout: Duration,
}

impl SourceConfiguration {
    pub fn new(authentication: Authentication) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            authentication,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    /// Build from `SOURCE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup. An API key takes precedence over a bearer token.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let authentication = match (get(ENV_API_KEY_ID), get(ENV_API_KEY_SECRET), get(ENV_TOKEN)) {
            (Some(id), Some(secret), _) => Authentication::api_key(id, secret),
            (Some(_), None, _) => {
                anyhow::bail!("{} is set but {} is missing", ENV_API_KEY_ID, ENV_API_KEY_SECRET)
            }
            (None, _, Some(token)) => Authentication::bearer(token),
            (None, _, None) => anyhow::bail!(
                "No Source credentials found; set {} and {}, or {}",
                ENV_API_KEY_ID,
                ENV_API_KEY_SECRET,
                ENV_TOKEN
            ),
        };

        let mut config = Self::new(authentication);
        if let Some(base_url) = get(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        debug!(base_url = %config.base_url, auth = config.authentication.kind(), "Loaded configuration from environment");
        Ok(config)
    }

    /// Environment first, then the saved config file with its keychain secret.
    pub fn resolve() -> Result<Self> {
        Self::resolve_from(
            |name| std::env::var(name).ok(),
            || Config::load()?.to_configuration(),
        )
    }

    /// Falls back to `saved` only when no credential variable is set.
    /// `SOURCE_BASE_URL` overrides the saved base URL.
    fn resolve_from<F, S>(lookup: F, saved: S) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        S: FnOnce() -> Result<Self>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let has_env_credentials = [ENV_API_KEY_ID, ENV_API_KEY_SECRET, ENV_TOKEN]
            .iter()
            .any(|name| get(*name).is_some());
        if has_env_credentials {
            return Self::from_lookup(&lookup);
        }

        let mut config = saved()?;
        if let Some(base_url) = get(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        debug!(base_url = %config.base_url, auth = config.authentication.kind(), "Loaded saved configuration");
        Ok(config)
    }
}

/// Saved CLI settings. The API key secret lives in the keychain, not here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<String>,
    pub api_key_id: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Ok(serde_json::from_str(&contents).context("Failed to parse config file")?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Combine saved settings with the API key secret from the keychain.
    pub fn to_configuration(&self) -> Result<SourceConfiguration> {
        let key_id = self
            .api_key_id
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No API key configured; run `source login` first"))?;
        let key = CredentialStore::load(key_id)?;
        Ok(self.apply(SourceConfiguration::new(Authentication::ApiKey(key))))
    }

    fn apply(&self, mut config: SourceConfiguration) -> SourceConfiguration {
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}
