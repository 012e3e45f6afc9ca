//! The collection registry.
//!
//! A [`Registry`] is built once from raw entries, either directly with
//! [`Registry::load`] or through a [`RegistryLoader`] that gathers several
//! sources first. Loading is all-or-nothing: any invalid entry or duplicated
//! id fails the whole load, so a registry handle is always complete.
//!
//! ```text
//! sources (.js / .json / .yaml)
//!     │  source::parse_*        comments stripped, order and duplicates kept
//!     ▼
//! Vec<RawEntry>
//!     │  validate + duplicate check
//!     ▼
//! Registry  ── resolve(id, locale) ──▶ Resolved { id, collection, fallback }
//!           ── list(prefix)        ──▶ ids in load order
//! ```

mod loader;
mod locale;
mod types;
mod validate;

pub use loader::{LoadState, RegistryLoader};
pub use locale::{FallbackPolicy, Locale, SuffixFallback};
pub use types::{Collection, DuplicateId, RawEntry, ResourceKind, ResourceRef, SourcePosition};
pub use validate::validate;

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::{CollectionError, Result};

/// Options fixed at load time
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Candidate-id policy used by lookups
    pub policy: Arc<dyn FallbackPolicy>,

    /// Locale applied when a lookup passes none
    pub default_locale: Option<Locale>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            policy: Arc::new(SuffixFallback::new()),
            default_locale: None,
        }
    }
}

/// Immutable, validated id → [`Collection`] table.
///
/// Cloning is cheap and clones share the same table, so one handle can be
/// built at startup and passed to every consumer or thread.
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug)]
struct RegistryInner {
    /// Entries in load order
    entries: Vec<(String, Collection)>,
    index: HashMap<String, usize>,
    options: RegistryOptions,
}

/// A successful lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    /// The registered id that matched, e.g. `index/primary/zhcn`
    pub id: &'a str,
    pub collection: &'a Collection,
    /// True when a lower-priority candidate matched
    pub fallback: bool,
}

impl Registry {
    /// Validate and freeze `entries` using the default suffix fallback policy.
    pub fn load(entries: impl IntoIterator<Item = RawEntry>) -> Result<Self> {
        Self::load_with(entries, RegistryOptions::default())
    }

    pub fn load_with(
        entries: impl IntoIterator<Item = RawEntry>,
        options: RegistryOptions,
    ) -> Result<Self> {
        let raw: Vec<RawEntry> = entries.into_iter().collect();

        let mut validated = Vec::with_capacity(raw.len());
        for entry in &raw {
            validated.push((entry.id.clone(), validate(entry)?));
        }

        let duplicates = find_duplicates(&raw);
        if !duplicates.is_empty() {
            return Err(CollectionError::DuplicateId { duplicates });
        }

        let index = validated
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (id.clone(), i))
            .collect();

        info!(collections = validated.len(), "Loaded collection registry");

        Ok(Self {
            inner: Arc::new(RegistryInner {
                entries: validated,
                index,
                options,
            }),
        })
    }

    /// Look up `id`, preferring its variant for `locale`.
    ///
    /// Falls back to the registry's default locale when `locale` is `None`.
    /// Returns `None` only when no candidate id is registered; an empty
    /// collection is still `Some`.
    pub fn get(&self, id: &str, locale: Option<&Locale>) -> Option<Resolved<'_>> {
        let locale = locale.or(self.inner.options.default_locale.as_ref());
        self.inner
            .options
            .policy
            .candidates(id, locale)
            .iter()
            .enumerate()
            .find_map(|(rank, candidate)| {
                let (matched, collection) = self.entry_at(*self.inner.index.get(candidate)?);
                Some(Resolved {
                    id: matched,
                    collection,
                    fallback: rank > 0,
                })
            })
    }

    /// Like [`Registry::get`] but reports a miss as [`CollectionError::NotFound`]
    /// listing every id that was tried.
    pub fn resolve(&self, id: &str, locale: Option<&Locale>) -> Result<Resolved<'_>> {
        self.get(id, locale).ok_or_else(|| {
            let locale = locale.or(self.inner.options.default_locale.as_ref());
            CollectionError::NotFound {
                id: id.to_string(),
                candidates: self.inner.options.policy.candidates(id, locale),
            }
        })
    }

    /// Exact lookup with no locale handling
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.inner
            .index
            .get(id)
            .map(|&i| &self.inner.entries[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.index.contains_key(id)
    }

    /// Registered ids in load order, optionally limited to a literal prefix
    pub fn list<'a>(&'a self, prefix: Option<&'a str>) -> impl Iterator<Item = &'a str> + 'a {
        self.entries(prefix).map(|(id, _)| id)
    }

    /// `(id, collection)` pairs in load order, optionally limited to a literal prefix
    pub fn entries<'a>(
        &'a self,
        prefix: Option<&'a str>,
    ) -> impl Iterator<Item = (&'a str, &'a Collection)> + 'a {
        self.inner
            .entries
            .iter()
            .filter(move |(id, _)| prefix.map_or(true, |p| id.starts_with(p)))
            .map(|(id, collection)| (id.as_str(), collection))
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn default_locale(&self) -> Option<&Locale> {
        self.inner.options.default_locale.as_ref()
    }

    fn entry_at(&self, i: usize) -> (&str, &Collection) {
        let (id, collection) = &self.inner.entries[i];
        (id.as_str(), collection)
    }
}

/// Every id that occurs more than once, in order of first appearance
fn find_duplicates(entries: &[RawEntry]) -> Vec<DuplicateId> {
    let mut seen: HashMap<&str, Vec<&RawEntry>> = HashMap::new();
    let mut order = Vec::new();
    for entry in entries {
        let occurrences = seen.entry(entry.id.as_str()).or_default();
        if occurrences.is_empty() {
            order.push(entry.id.as_str());
        }
        occurrences.push(entry);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let occurrences = &seen[id];
            (occurrences.len() > 1).then(|| DuplicateId {
                id: id.to_string(),
                positions: occurrences.iter().map(|e| e.position.clone()).collect(),
            })
        })
        .collect()
}
