//! Guitar voicing catalogs compiled into the binary.
//!
//! `build.rs` walks `catalog/` and emits one `(name, yaml)` entry per file;
//! the name is the file stem.

include!(concat!(env!("OUT_DIR"), "/catalogs.rs"));

#[derive(Debug, Clone)]
pub struct EmbeddedCatalog {
    pub name: &'static str,
    pub content: &'static str,
}

impl From<&(&'static str, &'static str)> for EmbeddedCatalog {
    fn from(&(name, content): &(&'static str, &'static str)) -> Self {
        Self { name, content }
    }
}

/// Every bundled catalog, ordered by name.
pub fn get_all_catalogs() -> Vec<EmbeddedCatalog> {
    CATALOGS.iter().map(EmbeddedCatalog::from).collect()
}

/// The catalog whose file stem is `name`, e.g. `"guitar"`.
pub fn get_catalog(name: &str) -> Option<EmbeddedCatalog> {
    CATALOGS.iter().find(|(n, _)| *n == name).map(EmbeddedCatalog::from)
}
