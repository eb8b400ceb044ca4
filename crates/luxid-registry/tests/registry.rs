//! End-to-end registration and verification against both store backends.

use std::sync::Arc;

use luxid_registry::{
    Catalog, CommitmentAlgorithm, MemorySink, MemoryStore, RegisterResult, RegistryConfig,
    RegistryError, RegistryStore, Registry, RejectReason, SqliteStore, VerificationOutcome,
};

const CATALOG: &str = r#"[
    { "id": "LV-2025-01", "rawData": "LV-2025-01-Alice",
      "brand": "Louis Vuitton", "model": "Speedy 30", "manufacturing": "Paris, France" },
    { "id": "GG-2025-07", "rawData": "GG-2025-07-Carol", "brand": "Gucci" },
    { "id": "RP-2025-03", "rawData": "RP-2025-03-Dave" }
]"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn memory_registry() -> Registry<MemoryStore> {
    Registry::new(MemoryStore::new(), RegistryConfig::default())
}

fn sqlite_registry() -> Registry<SqliteStore> {
    Registry::new(SqliteStore::open_memory().unwrap(), RegistryConfig::default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

async fn run_scenarios<S: RegistryStore>(registry: Registry<S>) {
    init_tracing();

    // 1. register then verify the genuine payload
    let r = registry
        .register("LV-2025-01", b"LV-2025-01-Alice")
        .await
        .unwrap();
    assert!(r.is_registered());
    assert_eq!(
        registry.verify("LV-2025-01", b"LV-2025-01-Alice").await.unwrap(),
        VerificationOutcome::Authentic
    );

    // 2. empty id
    assert_eq!(
        registry.register("", b"anything").await.unwrap(),
        RegisterResult::Rejected(RejectReason::IdEmpty)
    );

    // 3. same id, same payload, second time
    assert_eq!(
        registry
            .register("LV-2025-01", b"LV-2025-01-Alice")
            .await
            .unwrap(),
        RegisterResult::Rejected(RejectReason::AlreadyRegistered)
    );

    // 4. unknown id
    assert_eq!(
        registry.verify("NONEXISTENT", b"anything").await.unwrap(),
        VerificationOutcome::NotFound
    );

    // 5. registered id, different payload
    assert_eq!(
        registry.verify("LV-2025-01", b"LV-2025-01-Bob").await.unwrap(),
        VerificationOutcome::Fake
    );
}

#[tokio::test]
async fn test_scenarios_memory() {
    run_scenarios(memory_registry()).await;
}

#[tokio::test]
async fn test_scenarios_sqlite() {
    run_scenarios(sqlite_registry()).await;
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_write_once_keeps_original() {
    let registry = sqlite_registry();
    registry
        .register("LV-2025-01", b"LV-2025-01-Alice")
        .await
        .unwrap();
    let original = registry.entry("LV-2025-01").await.unwrap().unwrap();

    for payload in [&b"LV-2025-01-Mallory"[..], b"LV-2025-01-Alice", b""] {
        let r = registry.register("LV-2025-01", payload).await.unwrap();
        assert_eq!(r.reject_reason(), Some(&RejectReason::AlreadyRegistered));
    }

    assert_eq!(registry.entry("LV-2025-01").await.unwrap(), Some(original));
    assert_eq!(registry.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_reads_do_not_mutate() {
    let registry = memory_registry();
    registry.register("GG-2025-07", b"GG-2025-07-Carol").await.unwrap();
    let before = registry.entry("GG-2025-07").await.unwrap();

    for _ in 0..10 {
        assert_eq!(
            registry.verify("GG-2025-07", b"GG-2025-07-Carol").await.unwrap(),
            VerificationOutcome::Authentic
        );
        assert_eq!(
            registry.verify("GG-2025-07", b"forged").await.unwrap(),
            VerificationOutcome::Fake
        );
        assert_eq!(
            registry.verify("RP-2025-03", b"RP-2025-03-Dave").await.unwrap(),
            VerificationOutcome::NotFound
        );
    }

    assert_eq!(registry.entry("GG-2025-07").await.unwrap(), before);
    assert_eq!(registry.count().await.unwrap(), 1);
    assert!(!registry.exists("RP-2025-03").await.unwrap());
}

async fn race<S: RegistryStore + 'static>(registry: Registry<S>, contenders: usize) {
    init_tracing();
    let sink = Arc::new(MemorySink::new());
    let registry = registry.with_event_sink(sink.clone());

    let mut handles = Vec::new();
    for i in 0..contenders {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            let payload = format!("RP-2025-03-Dave-{i}");
            registry.register("RP-2025-03", payload.as_bytes()).await.unwrap()
        }));
    }

    let mut winners = Vec::new();
    let mut losers = 0;
    for h in handles {
        match h.await.unwrap() {
            RegisterResult::Registered(entry) => winners.push(entry),
            RegisterResult::Rejected(RejectReason::AlreadyRegistered) => losers += 1,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(losers, contenders - 1);

    // The stored commitment is the winner's, and only the winner emitted
    let stored = registry.get("RP-2025-03").await.unwrap();
    assert_eq!(stored, Some(winners[0].commitment));
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registration_memory() {
    race(memory_registry(), 64).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registration_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(dir.path().join("registry.db")).unwrap();
    race(Registry::new(store, RegistryConfig::default()), 32).await;
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_algorithm_must_match_between_registrant_and_verifier() {
    let store = Arc::new(MemoryStore::new());
    let blake = Registry::with_shared_store(store.clone(), RegistryConfig::default());
    let sha = Registry::with_shared_store(
        store,
        RegistryConfig {
            algorithm: CommitmentAlgorithm::Sha256,
            ..RegistryConfig::default()
        },
    );

    sha.register("LV-2025-01", b"LV-2025-01-Alice").await.unwrap();
    assert_eq!(
        sha.get("LV-2025-01").await.unwrap().map(|c| c.to_hex()),
        Some("b749ad25dd9aa336803e7d1a6229ea955e83ba5a1346f0994830f5b95c092346".to_string())
    );

    assert_eq!(
        sha.verify("LV-2025-01", b"LV-2025-01-Alice").await.unwrap(),
        VerificationOutcome::Authentic
    );
    assert_eq!(
        blake.verify("LV-2025-01", b"LV-2025-01-Alice").await.unwrap(),
        VerificationOutcome::Fake
    );
}

#[tokio::test]
async fn test_keccak_registry_accepts_ledger_digests() {
    let registry = Registry::new(
        MemoryStore::new(),
        RegistryConfig::from_toml_str(r#"algorithm = "keccak256""#).unwrap(),
    );

    // Import an entry by the digest an EVM ledger already holds
    let ledger_digest = luxid_registry::Commitment::from_hex(
        "0x3cd6f78e7bc859d027217261dd68d705ad4e5843d805cef83ccbb3c41f0ae33b",
    )
    .unwrap();
    assert!(registry
        .register_commitment("LV-2025-01", ledger_digest)
        .await
        .unwrap()
        .is_registered());

    assert_eq!(
        registry.verify("LV-2025-01", b"LV-2025-01-Alice").await.unwrap(),
        VerificationOutcome::Authentic
    );
    assert_eq!(
        registry.verify("LV-2025-01", b"LV-2025-01-Bob").await.unwrap(),
        VerificationOutcome::Fake
    );
}

#[tokio::test]
async fn test_open_writes_event_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("events.log");
    let config = RegistryConfig::from_toml_str(&format!(
        "event_log = {:?}\nalgorithm = \"sha256\"\n",
        log.display().to_string()
    ))
    .unwrap();

    let registry = Registry::open(MemoryStore::new(), config).unwrap();
    registry.register("LV-2025-01", b"LV-2025-01-Alice").await.unwrap();
    registry.register("LV-2025-01", b"LV-2025-01-Alice").await.unwrap();
    registry.register("LV-2025-01-X", b"LV-2025-01-X").await.unwrap();

    let contents = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(
        "ProductRegistered|LV-2025-01|0xb749ad25dd9aa336803e7d1a6229ea955e83ba5a1346f0994830f5b95c092346|"
    ));
}

#[tokio::test]
async fn test_open_rejects_invalid_config() {
    let config = RegistryConfig {
        max_id_len: 0,
        ..RegistryConfig::default()
    };
    let err = Registry::open(MemoryStore::new(), config).err().unwrap();
    assert!(matches!(err, RegistryError::Config(_)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Store failures
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_store_rejection_propagates() {
    let registry = Registry::new(MemoryStore::with_capacity_limit(1), RegistryConfig::default());
    registry.register("LV-2025-01", b"a").await.unwrap();

    let err = registry.register("GG-2025-07", b"b").await.unwrap_err();
    assert!(matches!(err, RegistryError::Store(_)));
    assert!(!err.is_retryable());
    assert!(!registry.exists("GG-2025-07").await.unwrap());
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_catalog_flow() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let registry = sqlite_registry();

    for record in catalog.iter() {
        assert!(registry
            .register_from_catalog(&catalog, &record.id)
            .await
            .unwrap()
            .is_registered());
    }
    assert_eq!(registry.count().await.unwrap(), 3);

    let report = registry
        .verify_with_catalog(&catalog, "LV-2025-01")
        .await
        .unwrap();
    assert_eq!(report.status, VerificationOutcome::Authentic);
    let product = report.product.unwrap();
    assert_eq!(product.brand, "Louis Vuitton");
    assert_eq!(product.serial_number, "LV-2025-01");

    let report = registry
        .verify_with_catalog(&catalog, "RP-2025-03")
        .await
        .unwrap();
    assert_eq!(report.product.unwrap().brand, "Unknown");

    let report = registry
        .verify_with_catalog(&catalog, "XX-0000-00")
        .await
        .unwrap();
    assert_eq!(report.status, VerificationOutcome::NotFound);
    assert!(report.product.is_none());
}

#[tokio::test]
async fn test_catalog_verify_normalizes_typed_id() {
    let registry = memory_registry();
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    registry
        .register_from_catalog(&catalog, "LV-2025-01")
        .await
        .unwrap();

    // Exact lookup misses lower-case input
    let report = registry
        .verify_with_catalog(&catalog, "  lv-2025-01 ")
        .await
        .unwrap();
    assert_eq!(report.status, VerificationOutcome::NotFound);

    let report = registry
        .verify_with_catalog_normalized(&catalog, "  lv-2025-01 ")
        .await
        .unwrap();
    assert_eq!(report.status, VerificationOutcome::Authentic);
    let product = report.product.unwrap();
    assert_eq!(product.serial_number, "LV-2025-01");
    assert_eq!(product.model, "Speedy 30");

    let report = registry
        .verify_with_catalog_normalized(&catalog, "gg-2025-07")
        .await
        .unwrap();
    assert_eq!(report.status, VerificationOutcome::NotFound);

    let report = registry
        .verify_with_catalog_normalized(&catalog, "xx-0000-00")
        .await
        .unwrap();
    assert_eq!(report.status, VerificationOutcome::NotFound);
    assert!(report.product.is_none());
}

#[tokio::test]
async fn test_catalog_tampered_payload_is_fake() {
    let registry = memory_registry();
    let genuine = Catalog::from_json_str(CATALOG).unwrap();
    registry
        .register_from_catalog(&genuine, "GG-2025-07")
        .await
        .unwrap();

    let tampered = Catalog::from_json_str(
        r#"[{ "id": "GG-2025-07", "rawData": "GG-2025-07-Mallory", "brand": "Gucci" }]"#,
    )
    .unwrap();
    let report = registry
        .verify_with_catalog(&tampered, "GG-2025-07")
        .await
        .unwrap();
    assert_eq!(report.status, VerificationOutcome::Fake);
    assert!(report.product.is_none());
}

#[tokio::test]
async fn test_register_unknown_catalog_product() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let err = memory_registry()
        .register_from_catalog(&catalog, "lv-2025-01")
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownProduct(_)));
}
