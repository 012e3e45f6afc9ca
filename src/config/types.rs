use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::registry::{Locale, RegistryOptions, SuffixFallback};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "collections.yaml";

/// Root configuration file structure for collections.yaml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryConfig {
    /// Glob patterns for collection source files, relative to the config file
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// Locale used when a lookup does not name one
    #[serde(default)]
    pub default_locale: Option<Locale>,

    /// Extra locales to try, in order, before falling back to the base id
    #[serde(default)]
    pub fallbacks: HashMap<Locale, Vec<Locale>>,
}

fn default_sources() -> Vec<String> {
    vec!["collections/*".to_string()]
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            default_locale: None,
            fallbacks: HashMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Registry options described by this configuration
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            policy: Arc::new(SuffixFallback::from_chains(self.fallbacks.clone())),
            default_locale: self.default_locale.clone(),
        }
    }
}
