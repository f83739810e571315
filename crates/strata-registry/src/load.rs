//! Loading a normalized catalog document.
//!
//! The document is JSON with a single `entry_points` array, each element a
//! command (`name`, `scope`, `gate`) or an alias (`name`, `alias_of`).
//! Turning a raw API registry into this normalized form is a separate
//! tool's job; this module only consumes the result.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogError};
use crate::entrypoint::EntryPoint;

/// A parsed catalog document, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub entry_points: Vec<EntryPoint>,
}

impl CatalogDocument {
    /// Read and parse a catalog document from a file path.
    pub fn from_file(path: &Path) -> Result<CatalogDocument, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_str(&content)
    }

    /// Parse a catalog document from a JSON string.
    pub fn from_str(content: &str) -> Result<CatalogDocument, String> {
        serde_json::from_str(content).map_err(|e| format!("Failed to parse catalog: {}", e))
    }

    /// Validate the declarations into a sealed [`Catalog`].
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        Catalog::build(self.entry_points)
    }
}
