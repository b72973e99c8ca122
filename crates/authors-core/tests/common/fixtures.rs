//! Test fixture loading utilities

use std::path::PathBuf;

use authors_core::{NameIndex, Registry, RegistryStore};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// The sample registry
#[allow(dead_code)]
pub fn load_registry() -> Registry {
    RegistryStore::new(fixture_path("all_known_authors.yml"))
        .load()
        .expect("sample registry should parse")
}

/// Index over the sample registry
#[allow(dead_code)]
pub fn load_index() -> NameIndex {
    NameIndex::new(load_registry())
}
