use std::io::Write;
use std::path::PathBuf;

use super::{load_registry, CommandHandler};
use crate::registry::Registry;
use crate::Result;

/// Handler for the `list` command
pub struct ListCommand {
    pub config: PathBuf,
    pub prefix: Option<String>,
}

impl CommandHandler for ListCommand {
    fn execute(&self) -> Result<()> {
        let registry = load_registry(&self.config)?;
        self.render(&registry, &mut std::io::stdout().lock())
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

impl ListCommand {
    pub fn new(config: PathBuf, prefix: Option<String>) -> Self {
        Self { config, prefix }
    }

    pub fn render(&self, registry: &Registry, out: &mut impl Write) -> Result<()> {
        for id in registry.list(self.prefix.as_deref()) {
            writeln!(out, "{id}")?;
        }
        Ok(())
    }
}
