use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::payments::error::{WompiError, WompiResult};

/// Wompi credentials and environment selection
///
/// Supplied by the host platform's gateway configuration and copied into
/// every handler; never mutated afterwards.
#[derive(Clone, Deserialize)]
pub struct WompiConfig {
    /// Public key (used in the merchant lookup path)
    #[serde(default)]
    pub key: Option<String>,
    /// Private key (sent as bearer token)
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
    /// Replaces the sandbox/production host when set
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_sandbox() -> bool {
    true
}

impl Default for WompiConfig {
    fn default() -> Self {
        Self {
            key: None,
            secret: None,
            sandbox: default_sandbox(),
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for WompiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WompiConfig")
            .field("key", &self.key)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("sandbox", &self.sandbox)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WompiConfig {
    pub fn new(key: impl Into<String>, secret: impl Into<String>, sandbox: bool) -> Self {
        Self {
            key: Some(key.into()),
            secret: Some(secret.into()),
            sandbox,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Load from `WOMPI_*` environment variables
    pub fn from_env() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix("WOMPI").try_parsing(true))
            .build()
            .context("Failed to read WOMPI_* environment")?;

        settings
            .try_deserialize()
            .context("Invalid Wompi configuration in environment")
    }

    /// Load from a config file, with `WOMPI_*` environment variables taking precedence
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(::config::Environment::with_prefix("WOMPI").try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read Wompi configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid Wompi configuration in {}", path.display()))
    }

    pub fn validate(&self) -> WompiResult<()> {
        if self.key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(WompiError::config_error("Invalid key for Wompi"));
        }

        // The key becomes a URL path segment in the merchant lookup.
        if let Some(key) = &self.key {
            if !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(WompiError::config_error(
                    "Key may only contain letters, digits, '_' and '-'",
                ));
            }
        }

        if self.secret.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(WompiError::config_error("Invalid secret for Wompi"));
        }

        if let Some(base_url) = &self.base_url {
            if base_url.trim().is_empty() {
                return Err(WompiError::config_error("Base URL cannot be empty"));
            }
        }

        if self.timeout_secs == Some(0) {
            return Err(WompiError::config_error(
                "Timeout must be greater than 0 seconds",
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
