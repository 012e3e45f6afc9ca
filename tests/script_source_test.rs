//! Loading the script-literal form the docs site authored its table in

use pretty_assertions::assert_eq;
use resource_collections::registry::{Locale, Registry, RegistryLoader, ResourceKind};
use resource_collections::source::{read_file, SourceFormat};
use resource_collections::CollectionError;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/collections.js")
}

fn fixture_registry() -> Registry {
    let mut loader = RegistryLoader::new();
    loader.add_source_file(&fixture()).unwrap();
    loader.finish().unwrap()
}

#[test]
fn test_fixture_loads_without_commented_entries() {
    let registry = fixture_registry();

    assert_eq!(registry.len(), 10);
    assert!(!registry.contains("launch/static"));
    assert!(registry.contains("launch/static/ja"));
}

#[test]
fn test_fixture_ids_in_file_order() {
    let registry = fixture_registry();
    assert_eq!(
        registry.list(Some("index/")).collect::<Vec<_>>(),
        vec![
            "index/carousel",
            "index/primary",
            "index/multiscreen",
            "index/primary/zhcn"
        ]
    );
}

#[test]
fn test_commented_reference_and_trailing_comma_dropped() {
    let registry = fixture_registry();
    let optimize = registry
        .collection("distribute/essentials/tabletguidelines/optimize")
        .unwrap();
    let refs: Vec<&str> = optimize.resources.iter().map(|r| r.as_str()).collect();
    assert_eq!(
        refs,
        vec![
            "design/style/metrics-grids.html",
            "design/style/devices-displays.html",
            "guide/practices/screens_support.html",
        ]
    );
}

#[test]
fn test_fixture_locale_resolution() {
    let registry = fixture_registry();
    let zhcn = Locale::new("zh-CN").unwrap();
    let ja = Locale::new("ja").unwrap();

    let resolved = registry.resolve("index/primary", Some(&zhcn)).unwrap();
    assert_eq!(resolved.id, "index/primary/zhcn");

    let resolved = registry.resolve("index/primary", Some(&ja)).unwrap();
    assert_eq!(resolved.id, "index/primary");
    assert!(resolved.fallback);

    // Only the localized variant survives; the base entry was commented out
    assert!(registry.resolve("launch/static", None).is_err());
    assert_eq!(
        registry.resolve("launch/static", Some(&ja)).unwrap().id,
        "launch/static/ja"
    );
}

#[test]
fn test_titles_and_kinds() {
    let registry = fixture_registry();
    assert_eq!(
        registry.collection("distribute/googleplay/cast").unwrap().title,
        "Google Cast"
    );

    let kinds: Vec<ResourceKind> = registry
        .collection("launch/static/ja")
        .unwrap()
        .resources
        .iter()
        .map(|r| r.kind())
        .collect();
    assert_eq!(kinds, vec![ResourceKind::External, ResourceKind::External]);
    assert!(registry.collection("distribute/tools/promote").unwrap().is_empty());
}

#[test]
fn test_duplicate_key_in_script_is_rejected() {
    let text = r#"var RESOURCE_COLLECTIONS = {
  "distribute/engage/community": {
    "title": "",
    "resources": ["distribute/users/build-community.html"]
  },
  "distribute/engage/kiwi": { "title": "", "resources": [] },
  "distribute/engage/community": {
    "title": "",
    "resources": ["distribute/users/build-community.html"]
  }
}"#;
    let mut loader = RegistryLoader::new();
    loader
        .add_source_str(text, SourceFormat::Script, "jd_collections.js")
        .unwrap();

    match loader.finish() {
        Err(CollectionError::DuplicateId { duplicates }) => {
            assert_eq!(duplicates[0].id, "distribute/engage/community");
            assert_eq!(
                duplicates[0]
                    .positions
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>(),
                vec!["jd_collections.js#0", "jd_collections.js#2"]
            );
        }
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_names_origin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.js");
    std::fs::write(&path, "var X = {\n  \"a\": { \"resources\": [\"x.html\" }\n};").unwrap();

    match read_file(&path) {
        Err(CollectionError::Source { origin, message }) => {
            assert!(origin.ends_with("broken.js"));
            assert!(message.contains("line 2"), "{message}");
        }
        other => panic!("expected Source error, got {other:?}"),
    }
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collections.txt");
    std::fs::write(&path, "{}").unwrap();
    assert!(matches!(read_file(&path), Err(CollectionError::Config(_))));
}
