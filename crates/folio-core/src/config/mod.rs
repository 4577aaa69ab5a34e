//! Configuration for the gateway
//!
//! YAML file, environment overrides and validation. Handlers never read the
//! environment themselves; they receive the resolved `FolioConfig` pieces at
//! construction time.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests;

use crate::errors::FolioError;
use std::path::Path;

/// Load a configuration from a YAML file
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<FolioConfig, FolioError> {
    ConfigLoader::from_file(path).await
}
