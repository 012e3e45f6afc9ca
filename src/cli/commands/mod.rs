pub mod links;
pub mod list;
pub mod resolve;
pub mod validate;

use std::path::Path;

use crate::config::ConfigLoader;
use crate::registry::Registry;
use crate::Result;

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command, writing results to stdout
    fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Build the registry described by the config file at `config`
pub(crate) fn load_registry(config: &Path) -> Result<Registry> {
    ConfigLoader::load_from_path(config)?.build_registry()
}
