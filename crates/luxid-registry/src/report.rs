//! Verification reports for presentation layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use luxid_core::{RegistryEntry, VerificationOutcome};

use crate::catalog::ProductRecord;

/// Placeholder for metadata the catalog does not carry.
pub const UNKNOWN: &str = "Unknown";

/// Outcome of a catalog-backed verification, shaped for JSON consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub status: VerificationOutcome,
    /// Present for authentic results only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductInfo>,
}

/// Display metadata for an authentic product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    /// UTC calendar date of registration, `YYYY-MM-DD`.
    pub registered_date: String,
    pub manufacturing: String,
}

impl ProductInfo {
    pub fn new(record: &ProductRecord, entry: &RegistryEntry) -> Self {
        let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            brand: or_unknown(&record.brand),
            model: or_unknown(&record.model),
            serial_number: record.id.clone(),
            registered_date: format_date(entry.registered_at),
            manufacturing: or_unknown(&record.manufacturing),
        }
    }
}

impl VerificationReport {
    pub fn not_found() -> Self {
        Self {
            status: VerificationOutcome::NotFound,
            product: None,
        }
    }

    /// Build a report; metadata is attached only when the outcome is
    /// authentic and the entry is known.
    pub fn new(
        outcome: VerificationOutcome,
        record: &ProductRecord,
        entry: Option<&RegistryEntry>,
    ) -> Self {
        let product = match (outcome, entry) {
            (VerificationOutcome::Authentic, Some(entry)) => Some(ProductInfo::new(record, entry)),
            _ => None,
        };
        Self {
            status: outcome,
            product,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn format_date(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxid_core::{commit, ProductId};

    fn entry() -> RegistryEntry {
        RegistryEntry::new(
            ProductId::try_from("LV-2025-01").unwrap(),
            commit(b"LV-2025-01-Alice"),
            1736899200000,
        )
    }

    #[test]
    fn test_authentic_report_json() {
        let mut record = ProductRecord::new("LV-2025-01", "LV-2025-01-Alice");
        record.brand = Some("Louis Vuitton".into());

        let report = VerificationReport::new(VerificationOutcome::Authentic, &record, Some(&entry()));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["status"], "authentic");
        assert_eq!(json["product"]["brand"], "Louis Vuitton");
        assert_eq!(json["product"]["model"], "Unknown");
        assert_eq!(json["product"]["serialNumber"], "LV-2025-01");
        assert_eq!(json["product"]["registeredDate"], "2025-01-15");
        assert_eq!(json["product"]["manufacturing"], "Unknown");
    }

    #[test]
    fn test_fake_report_has_no_product() {
        let record = ProductRecord::new("LV-2025-01", "LV-2025-01-Alice");
        let report = VerificationReport::new(VerificationOutcome::Fake, &record, Some(&entry()));

        assert!(report.product.is_none());
        assert_eq!(report.to_json().unwrap(), r#"{"status":"fake"}"#);
    }

    #[test]
    fn test_not_found_json() {
        assert_eq!(
            VerificationReport::not_found().to_json().unwrap(),
            r#"{"status":"not_found"}"#
        );
    }
}
