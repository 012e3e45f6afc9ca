use std::io::Write;
use std::path::PathBuf;

use super::{load_registry, CommandHandler};
use crate::registry::Registry;
use crate::Result;

/// Handler for the `links` command.
///
/// Emits one `id<TAB>kind<TAB>reference` row per reference, in registry order,
/// for an external link checker to consume.
pub struct LinksCommand {
    pub config: PathBuf,
    pub prefix: Option<String>,
    pub external_only: bool,
}

impl CommandHandler for LinksCommand {
    fn execute(&self) -> Result<()> {
        let registry = load_registry(&self.config)?;
        self.render(&registry, &mut std::io::stdout().lock())
    }

    fn name(&self) -> &'static str {
        "links"
    }
}

impl LinksCommand {
    pub fn new(config: PathBuf, prefix: Option<String>, external_only: bool) -> Self {
        Self {
            config,
            prefix,
            external_only,
        }
    }

    pub fn render(&self, registry: &Registry, out: &mut impl Write) -> Result<()> {
        for (id, collection) in registry.entries(self.prefix.as_deref()) {
            for resource in &collection.resources {
                if self.external_only && !resource.is_external() {
                    continue;
                }
                writeln!(out, "{id}\t{}\t{resource}", resource.kind())?;
            }
        }
        Ok(())
    }
}
