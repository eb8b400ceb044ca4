//! Product catalog: canonical payloads and display metadata.
//!
//! The catalog is the registrant's own list of products. It is never consulted
//! for the registry's answer, only to supply the payload being checked and the
//! metadata shown alongside an authentic result.
//!
//! JSON shape:
//!
//! ```json
//! [
//!   { "id": "LV-2025-01", "rawData": "LV-2025-01-Alice",
//!     "brand": "Louis Vuitton", "model": "Speedy 30", "manufacturing": "Paris, France" }
//! ]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    /// Canonical payload text; its UTF-8 bytes are what gets committed.
    pub raw_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing: Option<String>,
}

impl ProductRecord {
    pub fn new(id: impl Into<String>, raw_data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_data: raw_data.into(),
            brand: None,
            model: None,
            manufacturing: None,
        }
    }

    pub fn payload(&self) -> &[u8] {
        self.raw_data.as_bytes()
    }
}

/// Products keyed by exact identifier.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<String, ProductRecord>,
}

impl Catalog {
    /// Build a catalog, refusing duplicate identifiers.
    pub fn new(records: impl IntoIterator<Item = ProductRecord>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for record in records {
            if map.contains_key(&record.id) {
                return Err(RegistryError::Catalog(format!(
                    "duplicate product id: {}",
                    record.id
                )));
            }
            map.insert(record.id.clone(), record);
        }
        Ok(Self { records: map })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<ProductRecord> =
            serde_json::from_str(json).map_err(|e| RegistryError::Catalog(e.to_string()))?;
        Self::new(records)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.records.get(id)
    }

    /// Lookup after trimming whitespace and upper-casing, for identifiers
    /// typed by hand or decoded from a label.
    pub fn lookup_normalized(&self, raw: &str) -> Option<&ProductRecord> {
        self.records.get(&raw.trim().to_uppercase())
    }

    /// Canonical payload bytes for `id`.
    pub fn payload(&self, id: &str) -> Option<&[u8]> {
        self.get(id).map(ProductRecord::payload)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.records.values()
    }
}
