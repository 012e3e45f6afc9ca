use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use super::CommandHandler;
use crate::cli::OutputFormat;
use crate::config::ConfigLoader;
use crate::registry::{DuplicateId, Registry};
use crate::{CollectionError, Result};

/// Handler for the `validate` command
pub struct ValidateCommand {
    pub config: PathBuf,
    pub format: OutputFormat,
}

/// Machine-readable validation outcome
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub sources: usize,
    pub collections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<DuplicateId>,
}

impl ValidationReport {
    pub fn new(sources: usize, result: &Result<Registry>) -> Self {
        match result {
            Ok(registry) => Self {
                valid: true,
                sources,
                collections: registry.len(),
                error: None,
                duplicates: Vec::new(),
            },
            Err(e) => Self {
                valid: false,
                sources,
                collections: 0,
                error: Some(e.to_string()),
                duplicates: match e {
                    CollectionError::DuplicateId { duplicates } => duplicates.clone(),
                    _ => Vec::new(),
                },
            },
        }
    }

    pub fn write(&self, format: OutputFormat, out: &mut impl Write) -> Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
            OutputFormat::Text => match &self.error {
                None => writeln!(
                    out,
                    "OK: {} collections from {} sources",
                    self.collections, self.sources
                )?,
                Some(error) => writeln!(out, "INVALID: {error}")?,
            },
        }
        Ok(())
    }
}

impl CommandHandler for ValidateCommand {
    fn execute(&self) -> Result<()> {
        let loader = ConfigLoader::load_from_path(&self.config)?;
        let paths = loader.source_paths()?;
        let result = loader.build_registry_from(&paths);

        let report = ValidationReport::new(paths.len(), &result);
        report.write(self.format, &mut std::io::stdout().lock())?;

        let registry = result?;
        info!(collections = registry.len(), "Collections are valid");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "validate"
    }
}

impl ValidateCommand {
    /// Create new validate command
    pub fn new(config: PathBuf, format: OutputFormat) -> Self {
        Self { config, format }
    }
}
