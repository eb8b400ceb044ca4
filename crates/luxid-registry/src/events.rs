//! Registration events for external audit consumers.
//!
//! The registry emits one [`RegistrationEvent`] per successful registration,
//! after the entry is durable. Sinks are best-effort: a failing sink is
//! logged and never turns a completed registration into an error.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use luxid_core::{Commitment, ProductId, RegistryEntry};

/// Record of a product entering the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationEvent {
    pub id: ProductId,
    pub commitment: Commitment,
    /// Unix milliseconds.
    pub registered_at: i64,
}

impl RegistrationEvent {
    pub fn from_entry(entry: &RegistryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            commitment: entry.commitment,
            registered_at: entry.registered_at,
        }
    }

    /// Render as one audit log line:
    /// `ProductRegistered|<id>|0x<digest>|<rfc3339 timestamp>`.
    pub fn to_log_line(&self) -> String {
        format!(
            "ProductRegistered|{}|{}|{}\n",
            self.id,
            self.commitment.to_prefixed_hex(),
            format_timestamp(self.registered_at)
        )
    }
}

/// Format Unix milliseconds as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => millis.to_string(),
    }
}

/// Destination for registration events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &RegistrationEvent) -> io::Result<()>;
}

/// Emits events as `tracing` records under the `luxid::audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &RegistrationEvent) -> io::Result<()> {
        tracing::info!(
            target: "luxid::audit",
            id = %event.id,
            commitment = %event.commitment,
            registered_at = event.registered_at,
            "ProductRegistered"
        );
        Ok(())
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RegistrationEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events emitted so far, in emission order.
    pub fn events(&self) -> Vec<RegistrationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &RegistrationEvent) -> io::Result<()> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "event buffer poisoned"))?;
        events.push(event.clone());
        Ok(())
    }
}

/// Appends one line per event to a log file.
#[derive(Debug)]
pub struct LogFileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogFileSink {
    /// Open (or create) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for LogFileSink {
    fn emit(&self, event: &RegistrationEvent) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "event log poisoned"))?;
        file.write_all(event.to_log_line().as_bytes())?;
        file.flush()
    }
}
