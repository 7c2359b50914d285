//! 레지스트리 통합 테스트 - refresh 정책, 부분 실패, 동시 조회
//!
//! `cargo test -p proofreg-core --test registry_test`

use async_trait::async_trait;
use proofreg_core::{
    builtin_services, ProofServices, RawServiceConfig, RefreshOutcome, StaticProofServices,
    StaticServiceType,
};
use proofreg_foundation::{
    Environment, Error, ExternalServicesCollector, FixedPolicy, ParamProofStore, RegistryConfig,
    Result, RunMode, ServiceType, StoreEntry,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test doubles
// ============================================================================

/// 호출 횟수를 세는 가짜 store
struct FakeStore {
    payload: std::sync::Mutex<Option<String>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl FakeStore {
    fn with_payload(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            payload: std::sync::Mutex::new(Some(payload.to_string())),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            payload: std::sync::Mutex::new(None),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        })
    }

    fn slow(payload: Value, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            payload: std::sync::Mutex::new(Some(payload.to_string())),
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    fn set_payload(&self, payload: Option<Value>) {
        *self.payload.lock().unwrap() = payload.map(|p| p.to_string());
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParamProofStore for FakeStore {
    async fn get_latest_entry(&self) -> Result<StoreEntry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let payload = self.payload.lock().unwrap().clone();
        match payload {
            Some(p) => Ok(StoreEntry::new("test-hash", p)),
            None => Err(Error::Store("connection refused".into())),
        }
    }
}

fn service_record(domain: &str, display_name: &str) -> Value {
    json!({
        "version": 1,
        "domain": domain,
        "displayName": display_name,
        "username": { "re": "[a-z0-9_]+", "min": 1, "max": 30 },
        "prefillUrl": format!("https://{}/prove?u=%{{username}}&sig=%{{sig_hash}}", domain),
        "profileUrl": format!("https://{}/%{{username}}", domain),
        "checkUrl": format!("https://{}/api/%{{username}}/proofs", domain),
        "checkPath": ["proofs"]
    })
}

fn static_service(key: &str) -> Arc<dyn ServiceType> {
    Arc::new(StaticServiceType::new(key, format!("static {}", key), "[a-z]+").unwrap())
}

fn sorted(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys
}

// ============================================================================
// Static registry
// ============================================================================

#[tokio::test]
async fn test_static_and_dynamic_agree_without_refresh() {
    let static_services = StaticProofServices::new(builtin_services(), false);
    let dynamic = ProofServices::new(
        builtin_services(),
        false,
        FakeStore::failing(),
        Arc::new(FixedPolicy::never()),
    );

    assert_eq!(
        sorted(static_services.list_proof_checkers().await),
        sorted(dynamic.list_proof_checkers().await)
    );
}

#[tokio::test]
async fn test_case_insensitive_lookup_for_every_builtin_key() {
    let services = ProofServices::new(
        builtin_services(),
        true,
        FakeStore::failing(),
        Arc::new(FixedPolicy::never()),
    );

    for key in services.list_proof_checkers().await {
        let lower = services.get_service_type(&key).await.unwrap();
        let upper = services.get_service_type(&key.to_uppercase()).await.unwrap();
        let mixed: String = key
            .chars()
            .enumerate()
            .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
            .collect();
        let mixed = services.get_service_type(&mixed).await.unwrap();

        assert!(Arc::ptr_eq(&lower, &upper), "uppercase lookup differs for {}", key);
        assert!(Arc::ptr_eq(&lower, &mixed), "mixed-case lookup differs for {}", key);
    }
}

#[tokio::test]
async fn test_devel_only_builtin_visibility() {
    let store = FakeStore::failing();
    let prod = ProofServices::new(builtin_services(), false, store.clone(), Arc::new(FixedPolicy::never()));
    let devel = ProofServices::new(builtin_services(), true, store, Arc::new(FixedPolicy::never()));

    assert!(prod.get_service_type("rooter").await.is_none());
    assert!(!prod.list_proof_checkers().await.contains(&"rooter".to_string()));

    assert!(devel.get_service_type("Rooter").await.is_some());
    assert!(devel.list_proof_checkers().await.contains(&"rooter".to_string()));
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_partial_batch_adds_only_valid_records() {
    let mut broken_url = service_record("c.social", "C");
    broken_url["checkUrl"] = json!("https://c.social/api");

    let payload = json!({
        "services": [
            service_record("a.social", "A"),
            { "displayName": "Wrong types", "version": "one", "checkPath": 7 },
            service_record("b.social", "B"),
            broken_url,
        ]
    });

    let services = ProofServices::new(
        vec![static_service("x")],
        false,
        FakeStore::with_payload(payload),
        Arc::new(FixedPolicy::always()),
    );

    let report = services.refresh().await;
    match &report.outcome {
        RefreshOutcome::Merged { accepted, rejected } => {
            assert_eq!(accepted, &vec!["a.social".to_string(), "b.social".to_string()]);
            let indexes: Vec<usize> = rejected.iter().map(|r| r.index).collect();
            assert_eq!(indexes, vec![1, 3]);
            assert_eq!(rejected[0].display_name, "Wrong types");
            assert_eq!(rejected[1].display_name, "C");
        }
        other => panic!("expected merge, got {:?}", other),
    }

    assert_eq!(
        sorted(services.list_proof_checkers().await),
        vec!["a.social", "b.social", "x"]
    );
}

#[tokio::test]
async fn test_remote_overrides_static_alias() {
    let payload = json!({ "services": [service_record("x", "Remote X")] });
    let services = ProofServices::new(
        vec![static_service("x")],
        false,
        FakeStore::with_payload(payload),
        Arc::new(FixedPolicy::always()),
    );

    let x = services.get_service_type("X").await.unwrap();
    assert_eq!(x.display_name(), "Remote X");
    assert_eq!(services.list_proof_checkers().await, vec!["x".to_string()]);
}

#[tokio::test]
async fn test_fetch_error_returns_pre_refresh_state() {
    let store = FakeStore::failing();
    let services = ProofServices::new(
        vec![static_service("x"), static_service("z")],
        false,
        store.clone(),
        Arc::new(FixedPolicy::always()),
    );

    assert_eq!(sorted(services.list_proof_checkers().await), vec!["x", "z"]);
    assert_eq!(services.get_service_type("x").await.unwrap().display_name(), "static x");
    assert!(services.get_service_type("a.social").await.is_none());
    assert_eq!(store.calls(), 3);
}

#[tokio::test]
async fn test_later_failure_keeps_earlier_merge() {
    let store = FakeStore::with_payload(json!({ "services": [service_record("a.social", "A")] }));
    let services = ProofServices::new(
        vec![static_service("x")],
        false,
        store.clone(),
        Arc::new(FixedPolicy::always()),
    );

    assert!(services.get_service_type("a.social").await.is_some());

    store.set_payload(None);
    assert!(services.get_service_type("a.social").await.is_some());

    let stats = services.stats().await;
    assert_eq!(stats.refresh_attempts, 2);
    assert_eq!(stats.merges, 1);
    assert!(matches!(
        stats.last_report.map(|r| r.outcome),
        Some(RefreshOutcome::FetchFailed(_))
    ));
}

#[tokio::test]
async fn test_policy_false_never_calls_store() {
    let store = FakeStore::with_payload(json!({ "services": [service_record("a.social", "A")] }));
    let services = ProofServices::new(
        vec![static_service("x")],
        false,
        store.clone(),
        Arc::new(FixedPolicy::never()),
    );

    for _ in 0..5 {
        assert!(services.get_service_type("a.social").await.is_none());
        assert_eq!(services.list_proof_checkers().await, vec!["x".to_string()]);
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_policy_is_reevaluated_on_every_call() {
    let enabled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&enabled);
    let store = FakeStore::with_payload(json!({ "services": [service_record("a.social", "A")] }));

    let services = ProofServices::new(
        vec![static_service("x")],
        false,
        store.clone(),
        Arc::new(move || flag.load(Ordering::SeqCst)),
    );

    assert!(services.get_service_type("a.social").await.is_none());
    assert_eq!(store.calls(), 0);

    enabled.store(true, Ordering::SeqCst);
    assert!(services.get_service_type("a.social").await.is_some());
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn test_remote_keys_from_factory_example() {
    // builtins = [x], remote payload의 레코드 하나가 키 ["x", "y"]로 검증됨
    let factory = |record: &RawServiceConfig| -> Result<Arc<dyn ServiceType>> {
        let service = StaticServiceType::new("x", record.display_name(), "[a-z]+")?.alias("y");
        Ok(Arc::new(service))
    };

    let services = ProofServices::new(
        vec![static_service("x")],
        false,
        FakeStore::with_payload(json!({ "services": [{ "displayName": "X" }] })),
        Arc::new(FixedPolicy::always()),
    )
    .with_factory(Arc::new(factory));

    assert_eq!(sorted(services.list_proof_checkers().await), vec!["x", "y"]);

    let x = services.get_service_type("X").await.unwrap();
    assert_eq!(x.display_name(), "X");
    // 조회마다 다시 검증되므로 descriptor 인스턴스는 달라질 수 있음
    let y = services.get_service_type("y").await.unwrap();
    assert_eq!(y.display_name(), "X");
    assert_eq!(y.all_string_keys(), vec!["x".to_string(), "y".to_string()]);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_lookups_never_see_partial_state() {
    let store = FakeStore::slow(
        json!({ "services": [service_record("x", "Remote X"), service_record("a.social", "A")] }),
        Duration::from_millis(20),
    );
    let services = Arc::new(ProofServices::new(
        vec![static_service("x")],
        false,
        store.clone(),
        Arc::new(FixedPolicy::always()),
    ));

    let mut handles = Vec::new();
    for i in 0..16 {
        let services = Arc::clone(&services);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let x = services.get_service_type("x").await.unwrap();
                assert_eq!(x.display_name(), "Remote X");
            } else {
                let keys = sorted(services.list_proof_checkers().await);
                assert_eq!(keys, vec!["a.social", "x"]);
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.calls(), 16);
    assert_eq!(services.stats().await.merges, 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_as_collector_trait_object() {
    let services: Arc<dyn ExternalServicesCollector> = Arc::new(ProofServices::new(
        builtin_services(),
        false,
        FakeStore::with_payload(json!({ "services": [service_record("gubble.social", "Gubble")] })),
        Arc::new(FixedPolicy::always()),
    ));

    let gubble = services.get_service_type("Gubble.Social").await.unwrap();
    assert_eq!(gubble.normalize_username("Alice").unwrap(), "alice");
    assert!(services.list_proof_checkers().await.contains(&"github".to_string()));
}

// ============================================================================
// Config wiring
// ============================================================================

#[tokio::test]
async fn test_from_config_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paramproofs.json");
    let payload = json!({ "services": [service_record("gubble.social", "Gubble")] });
    std::fs::write(&path, payload.to_string()).unwrap();

    let config = RegistryConfig::new()
        .run_mode(RunMode::Devel)
        .store_path(path.to_string_lossy());
    let env = Environment {
        run_mode: RunMode::Devel,
        ..Default::default()
    };

    let services = ProofServices::from_config(&config, &env).unwrap();
    assert!(services.allows_devel_only());

    let keys = services.list_proof_checkers().await;
    assert!(keys.contains(&"gubble.social".to_string()));
    assert!(keys.contains(&"rooter".to_string()));
}

#[tokio::test]
async fn test_from_config_prod_does_not_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paramproofs.json");
    std::fs::write(&path, json!({ "services": [service_record("gubble.social", "Gubble")] }).to_string()).unwrap();

    let config = RegistryConfig::new().store_path(path.to_string_lossy());
    let env = Environment::default();

    let services = ProofServices::from_config(&config, &env).unwrap();
    assert!(services.get_service_type("gubble.social").await.is_none());
    assert!(services.get_service_type("rooter").await.is_none());
    assert_eq!(services.stats().await.refresh_attempts, 0);
}
