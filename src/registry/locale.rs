//! Locale-suffix fallback.
//!
//! Localized collections are ordinary entries whose id carries a locale
//! suffix, e.g. `index/primary/zhcn`. A [`FallbackPolicy`] turns a base id and
//! an optional locale into the ids to try, most specific first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{CollectionError, Result};

/// A locale in the site's id-suffix form (`zhcn`, `ja`, `ko`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Normalize a language tag to its suffix form.
    ///
    /// Tags are lowercased and `-`/`_` separators dropped, so `zh-CN`,
    /// `zh_cn` and `zhcn` all name the same locale.
    pub fn new(tag: &str) -> Result<Self> {
        let suffix: String = tag
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CollectionError::InvalidLocale(tag.to_string()));
        }
        Ok(Self(suffix))
    }

    pub fn suffix(&self) -> &str {
        &self.0
    }

    /// The id of this locale's variant of `base_id`
    pub fn variant_of(&self, base_id: &str) -> String {
        format!("{base_id}/{}", self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = CollectionError;

    fn try_from(tag: String) -> Result<Self> {
        Locale::new(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl std::str::FromStr for Locale {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::new(s)
    }
}

/// Produces candidate ids for a lookup, highest priority first
pub trait FallbackPolicy: Send + Sync + fmt::Debug {
    fn candidates(&self, base_id: &str, locale: Option<&Locale>) -> Vec<String>;
}

/// Suffix-based fallback: `base/<locale>`, then each configured fallback
/// locale's variant, then `base` itself.
#[derive(Debug, Clone, Default)]
pub struct SuffixFallback {
    chains: HashMap<Locale, Vec<Locale>>,
}

impl SuffixFallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try `fallbacks` (in order) after `locale` and before the base id
    pub fn with_chain(mut self, locale: Locale, fallbacks: Vec<Locale>) -> Self {
        self.chains.insert(locale, fallbacks);
        self
    }

    pub fn from_chains(chains: HashMap<Locale, Vec<Locale>>) -> Self {
        Self { chains }
    }

    fn locale_chain<'a>(&'a self, locale: &'a Locale) -> Vec<&'a Locale> {
        let mut chain = vec![locale];
        if let Some(fallbacks) = self.chains.get(locale) {
            for fallback in fallbacks {
                if !chain.contains(&fallback) {
                    chain.push(fallback);
                }
            }
        }
        chain
    }
}

impl FallbackPolicy for SuffixFallback {
    fn candidates(&self, base_id: &str, locale: Option<&Locale>) -> Vec<String> {
        let mut candidates: Vec<String> = locale
            .map(|locale| {
                self.locale_chain(locale)
                    .into_iter()
                    .map(|l| l.variant_of(base_id))
                    .collect()
            })
            .unwrap_or_default();
        candidates.push(base_id.to_string());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::new(tag).unwrap()
    }

    #[test]
    fn test_locale_normalization() {
        assert_eq!(locale("zh-CN").suffix(), "zhcn");
        assert_eq!(locale("zh_cn").suffix(), "zhcn");
        assert_eq!(locale(" JA ").suffix(), "ja");
        assert!(Locale::new("").is_err());
        assert!(Locale::new("-").is_err());
        assert!(Locale::new("zh/cn").is_err());
    }

    #[test]
    fn test_candidates_without_locale() {
        let policy = SuffixFallback::new();
        assert_eq!(policy.candidates("index/primary", None), ["index/primary"]);
    }

    #[test]
    fn test_candidates_with_locale() {
        let policy = SuffixFallback::new();
        assert_eq!(
            policy.candidates("index/primary", Some(&locale("zhcn"))),
            ["index/primary/zhcn", "index/primary"]
        );
    }

    #[test]
    fn test_candidates_follow_configured_chain() {
        let policy = SuffixFallback::new()
            .with_chain(locale("zhtw"), vec![locale("zhcn"), locale("zhtw")]);
        assert_eq!(
            policy.candidates("distribute/essentials", Some(&locale("zh-TW"))),
            [
                "distribute/essentials/zhtw",
                "distribute/essentials/zhcn",
                "distribute/essentials"
            ]
        );
        // Chains are not transitive
        assert_eq!(
            policy.candidates("x", Some(&locale("zhcn"))),
            ["x/zhcn", "x"]
        );
    }

    #[test]
    fn test_variant_keeps_base_id_verbatim() {
        assert_eq!(locale("zhcn").variant_of("x/"), "x//zhcn");
        assert_eq!(
            SuffixFallback::new().candidates("x/", Some(&locale("zhcn"))),
            ["x//zhcn", "x/"]
        );
    }

    #[test]
    fn test_locale_deserializes_normalized() {
        let locales: Vec<Locale> = serde_json::from_str(r#"["ko", "zh-CN"]"#).unwrap();
        assert_eq!(locales, vec![locale("ko"), locale("zhcn")]);
        assert!(serde_json::from_str::<Locale>(r#""""#).is_err());
    }
}
