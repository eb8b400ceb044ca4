//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use luxid_core::{commit, ProductId, RegistryEntry, VerificationOutcome};
use luxid_registry::{
    Catalog, MemorySink, RegisterResult, Registry, RegistryConfig, VerificationReport,
};
use luxid_store::MemoryStore;

/// The demo catalog: three products across three brands.
pub const SAMPLE_CATALOG_JSON: &str = r#"[
    { "id": "LV-2025-01", "rawData": "LV-2025-01-Alice",
      "brand": "Louis Vuitton", "model": "Speedy 30", "manufacturing": "Paris, France" },
    { "id": "GG-2025-07", "rawData": "GG-2025-07-Carol",
      "brand": "Gucci", "model": "Marmont Bag", "manufacturing": "Milan, Italy" },
    { "id": "RP-2025-03", "rawData": "RP-2025-03-Dave",
      "brand": "Rolex", "model": "Submariner", "manufacturing": "Geneva, Switzerland" }
]"#;

/// Parse [`SAMPLE_CATALOG_JSON`].
pub fn sample_catalog() -> Catalog {
    Catalog::from_json_str(SAMPLE_CATALOG_JSON).expect("sample catalog is valid")
}

/// Build an entry with the default commitment of `payload` and a fixed
/// timestamp.
pub fn entry(id: &str, payload: &[u8]) -> RegistryEntry {
    RegistryEntry::new(
        ProductId::try_from(id).expect("fixture id is valid"),
        commit(payload),
        1736899200000, // 2025-01-15T00:00:00Z
    )
}

/// A registry over a memory store, with captured events and the sample catalog.
pub struct TestFixture {
    pub registry: Registry<MemoryStore>,
    pub events: Arc<MemorySink>,
    pub catalog: Catalog,
}

impl TestFixture {
    /// Create a new test fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let events = Arc::new(MemorySink::new());
        let registry = Registry::new(MemoryStore::new(), config).with_event_sink(events.clone());
        Self {
            registry,
            events,
            catalog: sample_catalog(),
        }
    }

    /// Register every catalog product. Panics if any registration is refused.
    pub async fn register_catalog(&self) {
        for record in self.catalog.iter() {
            let result = self
                .registry
                .register_from_catalog(&self.catalog, &record.id)
                .await
                .expect("memory store does not fail");
            assert!(
                matches!(result, RegisterResult::Registered(_)),
                "{} was not registered: {:?}",
                record.id,
                result
            );
        }
    }

    /// Verify a catalog product's genuine payload.
    pub async fn verify_genuine(&self, id: &str) -> VerificationOutcome {
        let payload = self.catalog.payload(id).unwrap_or_default();
        self.registry
            .verify(id, payload)
            .await
            .expect("memory store does not fail")
    }

    pub async fn verify_report(&self, id: &str) -> VerificationReport {
        self.registry
            .verify_with_catalog(&self.catalog, id)
            .await
            .expect("memory store does not fail")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
