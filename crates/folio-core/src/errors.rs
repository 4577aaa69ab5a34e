//! Error types shared by the gateway crates
//!
//! Failures are grouped by where they come from: configuration, the
//! transport to the backend, or decoding what the backend sent back. Proxy
//! policies only need to know whether a failure happened before a backend
//! status was available, which `is_transport` answers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Backend URL is not configured")]
    BackendUnconfigured,
    #[error("Backend request failed: {0}")]
    Transport(String),
    #[error("Backend response could not be decoded: {0}")]
    Decode(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("YAML error: {0}")]
    Yaml(String),
}

impl FolioError {
    /// True when the failure happened before a usable backend reply existed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FolioError::BackendUnconfigured | FolioError::Transport(_) | FolioError::Decode(_)
        )
    }
}

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        FolioError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for FolioError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FolioError::Decode(err.to_string())
        } else {
            FolioError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Decode(err.to_string())
    }
}

impl From<serde_yaml::Error> for FolioError {
    fn from(err: serde_yaml::Error) -> Self {
        FolioError::Yaml(err.to_string())
    }
}
