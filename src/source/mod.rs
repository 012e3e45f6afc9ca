//! Source preparation.
//!
//! Turns collection definition files into ordered [`RawEntry`] lists. Three
//! formats are accepted:
//!
//! - JSON: `{ "id": { "title": "...", "resources": [...] }, ... }`
//! - YAML: the same mapping
//! - Script: the same object literal as authored for the docs site, with an
//!   optional `var NAME =` prefix, comments and trailing commas
//!
//! Keys are read in order and duplicates are kept, so the registry can report
//! every duplicated id instead of the parser silently keeping the last one.

mod script;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::registry::{RawEntry, SourcePosition};
use crate::{CollectionError, Result};

pub use script::strip_script;

/// Origin name used for definitions that did not come from a file
pub const INLINE_ORIGIN: &str = "<inline>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
    Script,
}

impl SourceFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "js" => Some(SourceFormat::Script),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Yaml => write!(f, "yaml"),
            SourceFormat::Script => write!(f, "script"),
        }
    }
}

/// Parse collection definitions from a string.
///
/// Entry positions are numbered from zero within this source.
pub fn parse_str(text: &str, format: SourceFormat, origin: &str) -> Result<Vec<RawEntry>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed = match format {
        SourceFormat::Json => serde_json::from_str::<OrderedEntries>(text)
            .map_err(|e| source_error(origin, e)),
        SourceFormat::Yaml => serde_yaml_ng::from_str::<OrderedEntries>(text)
            .map_err(|e| source_error(origin, e)),
        SourceFormat::Script => {
            let json = strip_script(text).map_err(|message| CollectionError::Source {
                origin: origin.to_string(),
                message,
            })?;
            serde_json::from_str::<OrderedEntries>(&json).map_err(|e| source_error(origin, e))
        }
    }?;

    debug!(origin, format = %format, entries = parsed.0.len(), "Parsed collection source");

    let origin: Arc<str> = Arc::from(origin);
    Ok(parsed
        .0
        .into_iter()
        .enumerate()
        .map(|(index, (id, body))| RawEntry::new(id, body, SourcePosition::new(origin.clone(), index)))
        .collect())
}

/// Read a definitions file, choosing the format from its extension
pub fn read_file(path: &Path) -> Result<Vec<RawEntry>> {
    let format = SourceFormat::from_path(path).ok_or_else(|| {
        CollectionError::Config(format!(
            "Unknown collection source format for {} (expected .js, .json, .yaml or .yml)",
            path.display()
        ))
    })?;

    let text = std::fs::read_to_string(path).map_err(|e| CollectionError::Source {
        origin: path.display().to_string(),
        message: format!("failed to read file: {e}"),
    })?;

    parse_str(&text, format, &path.display().to_string())
}

/// Build raw entries from in-code definitions, e.g. for tests or embedded tables
pub fn inline_entries<I, S>(definitions: I) -> Vec<RawEntry>
where
    I: IntoIterator<Item = (S, Value)>,
    S: Into<String>,
{
    let origin: Arc<str> = Arc::from(INLINE_ORIGIN);
    definitions
        .into_iter()
        .enumerate()
        .map(|(index, (id, body))| RawEntry::new(id, body, SourcePosition::new(origin.clone(), index)))
        .collect()
}

fn source_error(origin: &str, error: impl fmt::Display) -> CollectionError {
    CollectionError::Source {
        origin: origin.to_string(),
        message: error.to_string(),
    }
}

/// Top-level mapping read in document order, duplicate keys included
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of collection ids to collection definitions")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, body)) = map.next_entry::<String, Value>()? {
                    entries.push((id, body));
                }
                Ok(OrderedEntries(entries))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(OrderedEntries(Vec::new()))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
