//! The Registry: registration and verification over a write-once store.
//!
//! Registration validates the identifier, short-circuits on an existing
//! entry, then commits to the payload and inserts with compare-and-set.
//! The store's `put_if_absent` is the single arbiter of concurrent
//! registrations: the `exists` pre-check only saves a hash on the common
//! duplicate path.
//!
//! Verification recomputes the commitment and compares it with the stored one.
//! It never writes.

use std::sync::Arc;

use luxid_core::{
    Commitment, ProductId, RegistryEntry, ValidationError, VerificationOutcome,
};
use luxid_store::{PutResult, RegistryStore};

use crate::catalog::{Catalog, ProductRecord};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::events::{EventSink, LogFileSink, RegistrationEvent, TracingSink};
use crate::report::VerificationReport;

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Identifier is the empty string.
    IdEmpty,
    /// Identifier exceeds the configured byte length.
    IdTooLong { len: usize, max: usize },
    /// Identifier contains a control character.
    IdNotPrintable,
    /// An entry already exists; the stored commitment is unchanged.
    AlreadyRegistered,
}

impl From<ValidationError> for RejectReason {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::Empty => Self::IdEmpty,
            ValidationError::TooLong { len, max } => Self::IdTooLong { len, max },
            ValidationError::NotPrintable(_) => Self::IdNotPrintable,
        }
    }
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterResult {
    /// The entry was created by this call.
    Registered(RegistryEntry),
    /// Nothing was written.
    Rejected(RejectReason),
}

impl RegisterResult {
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }

    pub fn entry(&self) -> Option<&RegistryEntry> {
        match self {
            Self::Registered(entry) => Some(entry),
            Self::Rejected(_) => None,
        }
    }

    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Registered(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// The main Registry struct.
///
/// Cheap to clone: clones share the store and the event sink.
pub struct Registry<S: RegistryStore> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: RegistryConfig,
    /// Where registration events go.
    events: Arc<dyn EventSink>,
}

impl<S: RegistryStore> Clone for Registry<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            events: Arc::clone(&self.events),
        }
    }
}

impl<S: RegistryStore> Registry<S> {
    /// Create a registry that emits events through `tracing`.
    ///
    /// `config.event_log` is ignored here; use [`Registry::open`] to honour it.
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a registry over a store handle shared with other components.
    pub fn with_shared_store(store: Arc<S>, config: RegistryConfig) -> Self {
        Self {
            store,
            config,
            events: Arc::new(TracingSink),
        }
    }

    /// Validate the configuration and wire up the configured event log.
    pub fn open(store: S, config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        let events: Arc<dyn EventSink> = match &config.event_log {
            Some(path) => Arc::new(LogFileSink::open(path)?),
            None => Arc::new(TracingSink),
        };
        Ok(Self::new(store, config).with_event_sink(events))
    }

    /// Replace the event sink.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Commitment for `payload` under the configured algorithm.
    pub fn commit(&self, payload: &[u8]) -> Commitment {
        self.config.algorithm.commit(payload)
    }

    fn parse_id(&self, id: &str) -> std::result::Result<ProductId, ValidationError> {
        ProductId::new(id, self.config.max_id_len)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a product: bind `id` to the commitment of `payload`, once.
    ///
    /// Rejections (`IdEmpty`, `IdTooLong`, `IdNotPrintable`,
    /// `AlreadyRegistered`) are returned in `Ok`. Store failures propagate
    /// unchanged and are never retried here.
    pub async fn register(&self, id: &str, payload: &[u8]) -> Result<RegisterResult> {
        let id = match self.parse_id(id) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "registration rejected: invalid product id");
                return Ok(RegisterResult::Rejected(e.into()));
            }
        };

        if self.store.exists(&id).await? {
            tracing::debug!(%id, "registration rejected: already registered");
            return Ok(RegisterResult::Rejected(RejectReason::AlreadyRegistered));
        }

        let commitment = self.commit(payload);
        self.insert(id, commitment).await
    }

    /// Register a commitment computed elsewhere.
    ///
    /// Same validation and write-once rules as [`Registry::register`].
    pub async fn register_commitment(
        &self,
        id: &str,
        commitment: Commitment,
    ) -> Result<RegisterResult> {
        let id = match self.parse_id(id) {
            Ok(id) => id,
            Err(e) => return Ok(RegisterResult::Rejected(e.into())),
        };

        if self.store.exists(&id).await? {
            return Ok(RegisterResult::Rejected(RejectReason::AlreadyRegistered));
        }

        self.insert(id, commitment).await
    }

    /// Register a catalog product under its catalog identifier.
    pub async fn register_from_catalog(&self, catalog: &Catalog, id: &str) -> Result<RegisterResult> {
        let record = catalog
            .get(id)
            .ok_or_else(|| RegistryError::UnknownProduct(id.to_string()))?;
        self.register(&record.id, record.payload()).await
    }

    async fn insert(&self, id: ProductId, commitment: Commitment) -> Result<RegisterResult> {
        let entry = RegistryEntry::new(id, commitment, now_millis());

        match self.store.put_if_absent(&entry).await? {
            PutResult::Created => {
                tracing::info!(
                    id = %entry.id,
                    commitment = %entry.commitment,
                    algorithm = %self.config.algorithm,
                    "product registered"
                );
                self.emit(&entry);
                Ok(RegisterResult::Registered(entry))
            }
            PutResult::AlreadyExists => {
                // Another registrant won between our exists() and the insert
                tracing::warn!(id = %entry.id, "registration lost race: already registered");
                Ok(RegisterResult::Rejected(RejectReason::AlreadyRegistered))
            }
        }
    }

    fn emit(&self, entry: &RegistryEntry) {
        let event = RegistrationEvent::from_entry(entry);
        if let Err(e) = self.events.emit(&event) {
            tracing::warn!(id = %entry.id, error = %e, "failed to emit registration event");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Check a claimed payload against the registry.
    ///
    /// `NotFound`, `Authentic` and `Fake` are all `Ok`. Only store failures
    /// are errors.
    pub async fn verify(&self, id: &str, payload: &[u8]) -> Result<VerificationOutcome> {
        let expected = self.commit(payload);
        self.verify_commitment(id, &expected).await
    }

    /// Check a precomputed commitment against the registry.
    pub async fn verify_commitment(
        &self,
        id: &str,
        expected: &Commitment,
    ) -> Result<VerificationOutcome> {
        // An invalid id can never have been registered
        let Ok(id) = self.parse_id(id) else {
            return Ok(VerificationOutcome::NotFound);
        };

        let stored = self.store.get(&id).await?;
        let outcome = VerificationOutcome::classify(stored.as_ref(), expected);
        tracing::debug!(%id, %outcome, "verified product");
        Ok(outcome)
    }

    /// Verify a catalog product and build a presentation report.
    ///
    /// A product absent from the catalog is reported as `not_found`; the
    /// registry is not consulted for it.
    pub async fn verify_with_catalog(
        &self,
        catalog: &Catalog,
        id: &str,
    ) -> Result<VerificationReport> {
        let Some(record) = catalog.get(id) else {
            tracing::debug!(id, "product not in catalog");
            return Ok(VerificationReport::not_found());
        };
        self.verify_record(record).await
    }

    /// Like [`verify_with_catalog`](Self::verify_with_catalog), but resolves
    /// user-typed input the way the lookup form does: surrounding whitespace
    /// is dropped and the id is upper-cased before the catalog lookup. The
    /// registry is then queried under the catalog's own id.
    pub async fn verify_with_catalog_normalized(
        &self,
        catalog: &Catalog,
        raw_id: &str,
    ) -> Result<VerificationReport> {
        let Some(record) = catalog.lookup_normalized(raw_id) else {
            tracing::debug!(raw_id, "product not in catalog");
            return Ok(VerificationReport::not_found());
        };
        self.verify_record(record).await
    }

    async fn verify_record(&self, record: &ProductRecord) -> Result<VerificationReport> {
        let expected = self.commit(record.payload());
        let entry = match self.parse_id(&record.id) {
            Ok(id) => self.store.get_entry(&id).await?,
            Err(_) => None,
        };
        let outcome =
            VerificationOutcome::classify(entry.as_ref().map(|e| &e.commitment), &expected);
        tracing::debug!(id = %record.id, %outcome, "verified catalog product");

        Ok(VerificationReport::new(outcome, record, entry.as_ref()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `id` has been registered. Invalid identifiers never are.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        match self.parse_id(id) {
            Ok(id) => Ok(self.store.exists(&id).await?),
            Err(_) => Ok(false),
        }
    }

    /// Stored commitment for `id`.
    pub async fn get(&self, id: &str) -> Result<Option<Commitment>> {
        match self.parse_id(id) {
            Ok(id) => Ok(self.store.get(&id).await?),
            Err(_) => Ok(None),
        }
    }

    /// Full stored entry for `id`.
    pub async fn entry(&self, id: &str) -> Result<Option<RegistryEntry>> {
        match self.parse_id(id) {
            Ok(id) => Ok(self.store.get_entry(&id).await?),
            Err(_) => Ok(None),
        }
    }

    /// Number of registered products.
    pub async fn count(&self) -> Result<u64> {
        Ok(self.store.count().await?)
    }

    /// All registered identifiers, sorted.
    pub async fn list_ids(&self) -> Result<Vec<ProductId>> {
        Ok(self.store.list_ids().await?)
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
