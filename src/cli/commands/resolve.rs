use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

use super::{load_registry, CommandHandler};
use crate::cli::OutputFormat;
use crate::registry::{Locale, Registry};
use crate::Result;

/// Handler for the `resolve` command
pub struct ResolveCommand {
    pub config: PathBuf,
    pub id: String,
    pub locale: Option<String>,
    pub format: OutputFormat,
}

impl CommandHandler for ResolveCommand {
    fn execute(&self) -> Result<()> {
        let registry = load_registry(&self.config)?;
        self.render(&registry, &mut std::io::stdout().lock())
    }

    fn name(&self) -> &'static str {
        "resolve"
    }
}

impl ResolveCommand {
    pub fn new(config: PathBuf, id: String, locale: Option<String>, format: OutputFormat) -> Self {
        Self {
            config,
            id,
            locale,
            format,
        }
    }

    /// Resolve against `registry` and write the match. A miss is an error.
    pub fn render(&self, registry: &Registry, out: &mut impl Write) -> Result<()> {
        let locale = self.locale.as_deref().map(Locale::new).transpose()?;
        let resolved = registry.resolve(&self.id, locale.as_ref())?;

        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "id": resolved.id,
                    "fallback": resolved.fallback,
                    "title": resolved.collection.title,
                    "resources": resolved.collection.resources,
                });
                serde_json::to_writer_pretty(&mut *out, &value)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                writeln!(out, "# {}", resolved.id)?;
                if !resolved.collection.title.is_empty() {
                    writeln!(out, "# title: {}", resolved.collection.title)?;
                }
                for resource in &resolved.collection.resources {
                    writeln!(out, "{resource}")?;
                }
            }
        }
        Ok(())
    }
}
