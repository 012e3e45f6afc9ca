use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A reference to a piece of content, either a site-relative documentation
/// path or an absolute external URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

/// How a consumer should treat a [`ResourceRef`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Relative path, joined with the site base URL by the renderer
    Internal,
    /// Absolute `http://` or `https://` URL
    External,
}

impl ResourceRef {
    /// Wrap a reference string. Emptiness is checked by validation, not here.
    pub(crate) fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> ResourceKind {
        let lower = self.0.get(..8).unwrap_or(self.0.as_str()).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ResourceKind::External
        } else {
            ResourceKind::Internal
        }
    }

    pub fn is_external(&self) -> bool {
        self.kind() == ResourceKind::External
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Internal => write!(f, "internal"),
            ResourceKind::External => write!(f, "external"),
        }
    }
}

/// A validated collection as served to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Display label; empty when the source gave none
    pub title: String,

    /// References in display order, exactly as authored
    pub resources: Vec<ResourceRef>,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }
}

/// Where an entry came from in the load input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    /// File name, or `<inline>` for definitions built in code
    pub origin: Arc<str>,

    /// Zero-based index of the entry across the whole load input
    pub index: usize,
}

impl SourcePosition {
    pub fn new(origin: impl Into<Arc<str>>, index: usize) -> Self {
        Self {
            origin: origin.into(),
            index,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.origin, self.index)
    }
}

/// One unvalidated `(id, body)` pair, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub id: String,
    pub body: serde_json::Value,
    pub position: SourcePosition,
}

impl RawEntry {
    pub fn new(id: impl Into<String>, body: serde_json::Value, position: SourcePosition) -> Self {
        Self {
            id: id.into(),
            body,
            position,
        }
    }
}

/// An id defined more than once, with every place it was defined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateId {
    pub id: String,
    pub positions: Vec<SourcePosition>,
}

impl fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<String> = self.positions.iter().map(|p| p.to_string()).collect();
        write!(f, "'{}' defined at {}", self.id, positions.join(", "))
    }
}
