//! Registry of documentation resource collections.
//!
//! A collection is a named, ordered list of references (relative doc paths or
//! external URLs) that a site renderer turns into carousels and link lists.
//! Definitions are read from [`source`] files, validated and frozen into a
//! [`Registry`], then looked up with locale fallback.

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod source;

pub use error::{CollectionError, Result};
pub use registry::{
    Collection, FallbackPolicy, Locale, Registry, RegistryLoader, Resolved, ResourceKind,
    ResourceRef, SuffixFallback,
};
