use std::fmt;
use std::path::Path;
use tracing::debug;

use super::{RawEntry, Registry, RegistryOptions};
use crate::source::{self, SourceFormat};
use crate::{CollectionError, Result};

/// Lifecycle of a [`RegistryLoader`].
///
/// `Unloaded → Loading → Loaded` on success, `Unloaded → Loading → Failed`
/// otherwise. Both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Unloaded => write!(f, "unloaded"),
            LoadState::Loading => write!(f, "loading"),
            LoadState::Loaded => write!(f, "loaded"),
            LoadState::Failed => write!(f, "failed"),
        }
    }
}

/// Collects entries from one or more sources, then builds a [`Registry`].
///
/// Entries keep the order they were added in, across sources, and each one
/// is re-indexed to its position in the combined input so error reports
/// point at the right place.
#[derive(Debug)]
pub struct RegistryLoader {
    state: LoadState,
    entries: Vec<RawEntry>,
    options: RegistryOptions,
}

impl RegistryLoader {
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            state: LoadState::Unloaded,
            entries: Vec::new(),
            options,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Number of entries gathered so far
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Append already-parsed entries
    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = RawEntry>) -> Result<()> {
        self.begin()?;
        for mut entry in entries {
            entry.position.index = self.entries.len();
            self.entries.push(entry);
        }
        Ok(())
    }

    /// Parse `text` and append its entries
    pub fn add_source_str(&mut self, text: &str, format: SourceFormat, origin: &str) -> Result<()> {
        self.begin()?;
        let parsed = source::parse_str(text, format, origin);
        self.absorb(parsed)
    }

    /// Read and parse a source file, picking the format from its extension
    pub fn add_source_file(&mut self, path: &Path) -> Result<()> {
        self.begin()?;
        let parsed = source::read_file(path);
        self.absorb(parsed)
    }

    /// Build the registry from everything added so far
    pub fn finish(&mut self) -> Result<Registry> {
        self.begin()?;
        let entries = std::mem::take(&mut self.entries);
        let result = Registry::load_with(entries, self.options.clone());
        self.state = if result.is_ok() {
            LoadState::Loaded
        } else {
            LoadState::Failed
        };
        result
    }

    fn begin(&mut self) -> Result<()> {
        match self.state {
            LoadState::Loaded | LoadState::Failed => Err(CollectionError::LoaderFinished(self.state)),
            LoadState::Unloaded | LoadState::Loading => {
                self.state = LoadState::Loading;
                Ok(())
            }
        }
    }

    fn absorb(&mut self, parsed: Result<Vec<RawEntry>>) -> Result<()> {
        match parsed {
            Ok(entries) => {
                debug!(entries = entries.len(), "Added collection source");
                self.add_entries(entries)
            }
            Err(e) => {
                self.state = LoadState::Failed;
                self.entries.clear();
                Err(e)
            }
        }
    }
}

impl Default for RegistryLoader {
    fn default() -> Self {
        Self::new()
    }
}
