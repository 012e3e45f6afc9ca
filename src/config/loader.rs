use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::types::RegistryConfig;
use crate::registry::{Registry, RegistryLoader};
use crate::source::SourceFormat;
use crate::{CollectionError, Result};

/// Reads `collections.yaml` and turns it into a loaded [`Registry`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RegistryConfig,
    /// Directory source globs are resolved against
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Load configuration from a file.
    ///
    /// A missing file is not an error: the default configuration is used with
    /// the file's directory as the base for source globs.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                CollectionError::Config(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            serde_yaml_ng::from_str(&contents).map_err(|e| {
                CollectionError::Config(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            RegistryConfig::default()
        };

        Ok(Self::from_config(config, base_dir))
    }

    pub fn from_config(config: RegistryConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Expand the configured source globs.
    ///
    /// Patterns are expanded in the order given, matches within a pattern in
    /// sorted path order. A file matched twice is only loaded once. Matches
    /// that are directories or have no known source extension are skipped.
    pub fn source_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = Vec::new();

        for pattern in &self.config.sources {
            let full_pattern = self.base_dir.join(pattern);
            let full_pattern = full_pattern.to_string_lossy();

            let matches = glob::glob(&full_pattern).map_err(|e| {
                CollectionError::Config(format!("Invalid source pattern '{}': {}", pattern, e))
            })?;

            let mut matched: Vec<PathBuf> = Vec::new();
            for entry in matches {
                let path = entry.map_err(|e| {
                    CollectionError::Config(format!("Failed to read source path: {}", e))
                })?;
                if !path.is_file() {
                    continue;
                }
                if SourceFormat::from_path(&path).is_none() {
                    warn!("Skipping {}: not a collection source file", path.display());
                    continue;
                }
                matched.push(path);
            }

            if matched.is_empty() {
                warn!("Source pattern '{}' matched no files", pattern);
            }

            matched.sort();
            for path in matched {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }

        Ok(paths)
    }

    /// Load every configured source into a registry
    pub fn build_registry(&self) -> Result<Registry> {
        let paths = self.source_paths()?;
        self.build_registry_from(&paths)
    }

    /// Load `paths`, as returned by [`ConfigLoader::source_paths`], with this
    /// config's locale options
    pub fn build_registry_from(&self, paths: &[PathBuf]) -> Result<Registry> {
        let mut loader = RegistryLoader::with_options(self.config.registry_options());
        for path in paths {
            debug!("Loading collection source {}", path.display());
            loader.add_source_file(path)?;
        }
        loader.finish()
    }
}
