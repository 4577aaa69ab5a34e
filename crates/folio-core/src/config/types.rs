//! Configuration type definitions for the gateway
//!
//! Every section has defaults so an empty YAML document (or no file at all)
//! yields a runnable frontend surface that serves fallback content.

use crate::errors::FolioError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Which HTTP face the process serves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Public portfolio API: health, SEO, chat, content with fallback, sitemap.
    #[default]
    Frontend,
    /// Admin API: auth and content management proxies.
    Dashboard,
}

impl FromStr for Surface {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frontend" => Ok(Surface::Frontend),
            "dashboard" => Ok(Surface::Dashboard),
            other => Err(FolioError::Config(format!(
                "Unknown surface '{}', expected 'frontend' or 'dashboard'",
                other
            ))),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Frontend => write!(f, "frontend"),
            Surface::Dashboard => write!(f, "dashboard"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub surface: Surface,
    /// Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_true")]
    pub enable_logging: bool,
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            surface: Surface::default(),
            cors_origins: Vec::new(),
            enable_logging: true,
            max_body_size: default_max_body_size(),
        }
    }
}

impl ServerSection {
    pub fn socket_addr(&self) -> Result<SocketAddr, FolioError> {
        self.bind_addr.parse().map_err(|e| {
            FolioError::Config(format!("Invalid bind address '{}': {}", self.bind_addr, e))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    /// Base URL of the external backend. Server-side only.
    #[serde(default)]
    pub url: Option<String>,
    /// Client-wide timeout. Unset means proxied requests wait for the
    /// backend however long it takes.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Timeout for public content reads, which fall back to demo data.
    #[serde(default = "default_content_timeout_secs")]
    pub content_timeout_secs: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: None,
            content_timeout_secs: default_content_timeout_secs(),
        }
    }
}

impl BackendSection {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout_secs)
    }

    /// Parsed backend base URL, `None` when no backend is configured.
    pub fn base_url(&self) -> Result<Option<Url>, FolioError> {
        let raw = match self.url.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let url = Url::parse(raw)
            .map_err(|e| FolioError::Config(format!("Invalid backend URL '{}': {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(Some(url)),
            scheme => Err(FolioError::Config(format!(
                "Backend URL must use http or https, got '{}'",
                scheme
            ))),
        }
    }
}

/// Owner and site identity used by SEO records, sitemap and fallback data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    #[serde(default = "default_owner_first_name")]
    pub owner_first_name: String,
    #[serde(default = "default_owner_title")]
    pub owner_title: String,
    #[serde(default = "default_owner_bio")]
    pub owner_bio: String,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_site_description")]
    pub site_description: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner_name: default_owner_name(),
            owner_first_name: default_owner_first_name(),
            owner_title: default_owner_title(),
            owner_bio: default_owner_bio(),
            site_name: default_site_name(),
            site_description: default_site_description(),
            site_url: default_site_url(),
            chat_path: default_chat_path(),
        }
    }
}

impl SiteConfig {
    pub fn chat_page_title(&self) -> String {
        format!("Ask {}", self.owner_first_name)
    }

    pub fn chat_page_description(&self) -> String {
        format!(
            "Chat with an AI assistant to learn more about {}",
            self.owner_name
        )
    }

    /// Site URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}

impl FolioConfig {
    pub fn validate(&self) -> Result<(), FolioError> {
        self.server.socket_addr()?;
        self.backend.base_url()?;

        if self.backend.timeout_secs == Some(0) || self.backend.content_timeout_secs == 0 {
            return Err(FolioError::Config(
                "Backend timeouts must be greater than zero".to_string(),
            ));
        }

        if self.server.max_body_size == 0 {
            return Err(FolioError::Config(
                "max_body_size must be greater than zero".to_string(),
            ));
        }

        Url::parse(&self.site.site_url).map_err(|e| {
            FolioError::Config(format!("Invalid site URL '{}': {}", self.site.site_url, e))
        })?;

        if !self.site.chat_path.starts_with('/') {
            return Err(FolioError::Config(format!(
                "chat_path must start with '/', got '{}'",
                self.site.chat_path
            )));
        }

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024
}

fn default_content_timeout_secs() -> u64 {
    10
}

fn default_owner_name() -> String {
    "Your Name".to_string()
}

fn default_owner_first_name() -> String {
    "User".to_string()
}

fn default_owner_title() -> String {
    "Full-Stack Developer".to_string()
}

fn default_owner_bio() -> String {
    "Passionate developer building innovative solutions with modern technologies.".to_string()
}

fn default_site_name() -> String {
    "Portfolio".to_string()
}

fn default_site_description() -> String {
    "My personal portfolio showcasing projects and skills".to_string()
}

fn default_site_url() -> String {
    "https://example.com".to_string()
}

fn default_chat_path() -> String {
    "/Ask-Username".to_string()
}
