//! Configuration loader for YAML files and environment overrides
//!
//! Values are resolved in three layers: built-in defaults, an optional YAML
//! document, then environment variables. The result is validated before it
//! is handed out.

use crate::config::types::*;
use crate::errors::FolioError;
use std::env;
use std::path::Path;
use tokio::fs;

/// Canonical, server-side-only key for the backend base URL.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Legacy public key. Never read; only reported when it is the sole one set.
pub const LEGACY_BACKEND_URL_ENV: &str = "NEXT_PUBLIC_BACKEND_URL";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<FolioConfig, FolioError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            FolioError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        log::info!("Loaded configuration file {}", path.display());
        Self::from_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_str(content: &str) -> Result<FolioConfig, FolioError> {
        let mut config: FolioConfig = if content.trim().is_empty() {
            FolioConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| FolioError::Config(format!("Failed to parse YAML config: {}", e)))?
        };

        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment, for deployments without a config file.
    pub fn from_env() -> Result<FolioConfig, FolioError> {
        let mut config = FolioConfig::default();
        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment-style overrides onto `config`.
    ///
    /// `lookup` abstracts the environment so callers (and tests) can supply
    /// their own source. Empty values count as unset.
    pub fn apply_overrides<F>(config: &mut FolioConfig, lookup: F) -> Result<(), FolioError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        match get(BACKEND_URL_ENV) {
            Some(url) => config.backend.url = Some(url),
            None => {
                if get(LEGACY_BACKEND_URL_ENV).is_some() && config.backend.url.is_none() {
                    log::warn!(
                        "{} is set but ignored; set {} instead",
                        LEGACY_BACKEND_URL_ENV,
                        BACKEND_URL_ENV
                    );
                }
            }
        }

        if let Some(addr) = get("FOLIO_BIND_ADDR") {
            config.server.bind_addr = addr;
        }
        if let Some(surface) = get("FOLIO_SURFACE") {
            config.server.surface = surface.parse()?;
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        let site = &mut config.site;
        for (key, slot) in [
            ("SITE_URL", &mut site.site_url),
            ("SITE_NAME", &mut site.site_name),
            ("SITE_DESCRIPTION", &mut site.site_description),
            ("OWNER_NAME", &mut site.owner_name),
            ("OWNER_FIRST_NAME", &mut site.owner_first_name),
            ("OWNER_TITLE", &mut site.owner_title),
            ("OWNER_BIO", &mut site.owner_bio),
        ] {
            if let Some(value) = get(key) {
                *slot = value;
            }
        }

        Ok(())
    }
}
