//! Store wrapper that fails on demand.
//!
//! Used to check that backend failures reach the caller unchanged, that
//! nothing is retried behind the caller's back, and that a failed
//! registration leaves no entry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use luxid_core::{Commitment, ProductId, RegistryEntry};
use luxid_store::{PutResult, RegistryStore, Result, StoreError};

/// Kind of failure to inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Transient: `StoreError::Unavailable`.
    Unavailable,
    /// Permanent: `StoreError::Rejected`.
    Rejected,
}

impl Fault {
    fn to_error(self, op: &str) -> StoreError {
        match self {
            Fault::Unavailable => StoreError::Unavailable(format!("injected fault in {}", op)),
            Fault::Rejected => StoreError::Rejected(format!("injected fault in {}", op)),
        }
    }
}

/// Wraps a store, injecting faults into reads and writes independently.
pub struct FaultyStore<S> {
    inner: S,
    read_fault: Mutex<Option<Fault>>,
    write_fault: Mutex<Option<Fault>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl<S: RegistryStore> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            read_fault: Mutex::new(None),
            write_fault: Mutex::new(None),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Fail every subsequent read (`get`, `get_entry`, `exists`, `count`,
    /// `list_ids`), or stop failing with `None`.
    pub fn fail_reads(&self, fault: Option<Fault>) {
        set(&self.read_fault, fault);
    }

    /// Fail every subsequent `put_if_absent`, or stop failing with `None`.
    pub fn fail_writes(&self, fault: Option<Fault>) {
        set(&self.write_fault, fault);
    }

    /// Number of read calls attempted so far, failed ones included.
    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `put_if_absent` calls attempted so far, failed ones included.
    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn before_read(&self, op: &str) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        check(&self.read_fault, op)
    }

    fn before_write(&self, op: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        check(&self.write_fault, op)
    }
}

fn set(slot: &Mutex<Option<Fault>>, fault: Option<Fault>) {
    match slot.lock() {
        Ok(mut guard) => *guard = fault,
        Err(poisoned) => *poisoned.into_inner() = fault,
    }
}

fn check(slot: &Mutex<Option<Fault>>, op: &str) -> Result<()> {
    let fault = match slot.lock() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    };
    match fault {
        Some(fault) => Err(fault.to_error(op)),
        None => Ok(()),
    }
}

#[async_trait]
impl<S: RegistryStore> RegistryStore for FaultyStore<S> {
    async fn put_if_absent(&self, entry: &RegistryEntry) -> Result<PutResult> {
        self.before_write("put_if_absent")?;
        self.inner.put_if_absent(entry).await
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Commitment>> {
        self.before_read("get")?;
        self.inner.get(id).await
    }

    async fn get_entry(&self, id: &ProductId) -> Result<Option<RegistryEntry>> {
        self.before_read("get_entry")?;
        self.inner.get_entry(id).await
    }

    async fn exists(&self, id: &ProductId) -> Result<bool> {
        self.before_read("exists")?;
        self.inner.exists(id).await
    }

    async fn count(&self) -> Result<u64> {
        self.before_read("count")?;
        self.inner.count().await
    }

    async fn list_ids(&self) -> Result<Vec<ProductId>> {
        self.before_read("list_ids")?;
        self.inner.list_ids().await
    }
}
