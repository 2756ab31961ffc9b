use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

/// A named effect or transition loaded from a catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub output_file: Option<String>,
}

impl CatalogEntry {
    /// Numeric parameter with a default when absent or non-numeric.
    pub fn param_f64(&self, key: &str, default: f64) -> f64 {
        self.parameters
            .get(key)
            .and_then(|v| v.as_f64())
            .unwrap_or(default)
    }
}

/// Name-keyed catalog, shared read-only by the builder and the assembler.
pub type Catalog = BTreeMap<String, CatalogEntry>;

/// Load a catalog document: a top-level JSON array of named entries.
///
/// Duplicate names are last-write-wins. Any read or parse failure yields an
/// empty catalog with a warning; downstream stages degrade to pass-through
/// or plain concatenation.
pub async fn load_catalog(path: &Path) -> Catalog {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read catalog {}: {e}", path.display());
            return Catalog::new();
        }
    };

    let entries: Vec<CatalogEntry> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("failed to parse catalog {}: {e}", path.display());
            return Catalog::new();
        }
    };

    entries.into_iter().map(|e| (e.name.clone(), e)).collect()
}
