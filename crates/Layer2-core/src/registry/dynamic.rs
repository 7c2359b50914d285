//! Proof Services - builtin + 원격 param proof 설정을 합친 레지스트리
//!
//! 모든 조회는 하나의 Mutex 안에서 다음 순서로 진행됩니다.
//!
//! ```text
//! get_service_type / list_proof_checkers
//!        │ lock
//!        ▼
//! RefreshPolicy::should_refresh() ── false ──▶ 현재 매핑으로 응답
//!        │ true
//!        ▼
//! ParamProofStore::get_latest_entry() ── Err ──▶ debug 로그, 현재 매핑으로 응답
//!        │
//!        ▼
//! parse_service_configs() ── Err ──▶ debug 로그, 현재 매핑으로 응답
//!        │
//!        ▼
//! validate_records() (레코드별 독립 검증, 실패는 건너뜀)
//!        │
//!        ▼
//! ServiceCollection::register() (원격 설정이 같은 키를 덮어씀)
//! ```
//!
//! refresh 실패는 호출자에게 전파되지 않습니다.

use super::collection::ServiceCollection;
use super::report::{RefreshOutcome, RefreshReport, RegistryStats};
use crate::services::{
    builtin_services, parse_service_configs, validate_records, GenericSocialProofFactory,
    RecordOutcome, ServiceConfigFactory,
};
use crate::store::store_from_config;
use async_trait::async_trait;
use chrono::Utc;
use proofreg_foundation::{
    EnvRefreshPolicy, Environment, ExternalServicesCollector, ParamProofStore, RefreshPolicy,
    RegistryConfig, Result, ServiceType,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Mutex로 보호되는 상태
#[derive(Debug, Default)]
struct ProofServicesState {
    collection: ServiceCollection,
    refresh_attempts: u64,
    merges: u64,
    last_report: Option<RefreshReport>,
}

/// builtin 서비스와 원격 설정 서비스를 함께 관리하는 레지스트리
///
/// 정책이 허용하는 모든 조회에서 최신 entry를 다시 가져옵니다.
/// entry 해시 비교로 재파싱을 건너뛰지 않습니다.
pub struct ProofServices {
    state: Mutex<ProofServicesState>,
    store: Arc<dyn ParamProofStore>,
    policy: Arc<dyn RefreshPolicy>,
    factory: Arc<dyn ServiceConfigFactory>,
    allow_devel_only: bool,
}

impl ProofServices {
    /// 새 레지스트리 생성 (builtin 서비스로 초기화)
    pub fn new(
        builtins: Vec<Arc<dyn ServiceType>>,
        allow_devel_only: bool,
        store: Arc<dyn ParamProofStore>,
        policy: Arc<dyn RefreshPolicy>,
    ) -> Self {
        let mut state = Mutex::new(ProofServicesState::default());
        state.get_mut().collection.register(builtins, allow_devel_only);

        Self {
            state,
            store,
            policy,
            factory: Arc::new(GenericSocialProofFactory),
            allow_devel_only,
        }
    }

    /// 설정 + 환경으로 생성
    pub fn from_config(config: &RegistryConfig, env: &Environment) -> Result<Self> {
        let store = store_from_config(&config.store)?;
        let policy = Arc::new(EnvRefreshPolicy::from_environment(env));
        let allow_devel_only = env.allow_devel_checkers(config);

        debug!(
            "Creating proof services (run_mode={}, devel_checkers={}, refresh={})",
            env.run_mode,
            allow_devel_only,
            policy.should_refresh()
        );

        Ok(Self::new(builtin_services(), allow_devel_only, store, policy))
    }

    /// 레코드 검증 factory 교체
    pub fn with_factory(mut self, factory: Arc<dyn ServiceConfigFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn allows_devel_only(&self) -> bool {
        self.allow_devel_only
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 키로 서비스 조회 (대소문자 무시, refresh 후 응답)
    pub async fn get_service_type(&self, key: &str) -> Option<Arc<dyn ServiceType>> {
        let mut state = self.state.lock().await;
        self.load_param_proof_services(&mut state).await;
        state.collection.get(key)
    }

    /// 모든 키 (refresh 후 응답, 순서 보장 없음)
    pub async fn list_proof_checkers(&self) -> Vec<String> {
        let mut state = self.state.lock().await;
        self.load_param_proof_services(&mut state).await;
        state.collection.keys()
    }

    /// 조회 없이 refresh만 수행 (정책은 그대로 적용)
    pub async fn refresh(&self) -> RefreshReport {
        let mut state = self.state.lock().await;
        self.load_param_proof_services(&mut state).await
    }

    /// 통계 (refresh 하지 않음)
    pub async fn stats(&self) -> RegistryStats {
        let state = self.state.lock().await;
        RegistryStats {
            keys: state.collection.len(),
            refresh_attempts: state.refresh_attempts,
            merges: state.merges,
            last_report: state.last_report.clone(),
        }
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    async fn load_param_proof_services(&self, state: &mut ProofServicesState) -> RefreshReport {
        let started_at = Utc::now();
        let timer = Instant::now();

        if !self.policy.should_refresh() {
            return RefreshReport {
                outcome: RefreshOutcome::Disabled,
                entry_hash: None,
                started_at,
                elapsed: timer.elapsed(),
            };
        }

        state.refresh_attempts += 1;
        let mut entry_hash = None;

        let outcome = match self.store.get_latest_entry().await {
            Err(e) => {
                debug!("unable to load paramproofs: {}", e);
                RefreshOutcome::FetchFailed(e.to_string())
            }
            Ok(entry) => {
                entry_hash = Some(entry.hash.clone());
                match parse_service_configs(&entry) {
                    Err(e) => {
                        debug!("unable to parse paramproofs: {}", e);
                        RefreshOutcome::DecodeFailed(e.to_string())
                    }
                    Ok(records) => self.merge(state, validate_records(self.factory.as_ref(), &records)),
                }
            }
        };

        let report = RefreshReport {
            outcome,
            entry_hash,
            started_at,
            elapsed: timer.elapsed(),
        };
        state.last_report = Some(report.clone());
        report
    }

    fn merge(&self, state: &mut ProofServicesState, outcomes: Vec<RecordOutcome>) -> RefreshOutcome {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        let mut services = Vec::new();

        for outcome in outcomes {
            match outcome {
                RecordOutcome::Accepted(service)
                    if service.is_devel_only() && !self.allow_devel_only =>
                {
                    debug!("Skipping devel-only param proof service {}", service.key());
                }
                RecordOutcome::Accepted(service) => {
                    accepted.push(service.key());
                    services.push(service);
                }
                RecordOutcome::Rejected(record) => {
                    debug!(
                        "Unable to validate config for {}: {}",
                        record.display_name, record.reason
                    );
                    rejected.push(record);
                }
            }
        }

        state.collection.register(services, self.allow_devel_only);
        state.merges += 1;

        info!(
            "Merged param proof services: {} accepted, {} rejected, {} keys total",
            accepted.len(),
            rejected.len(),
            state.collection.len()
        );

        RefreshOutcome::Merged { accepted, rejected }
    }
}

#[async_trait]
impl ExternalServicesCollector for ProofServices {
    async fn get_service_type(&self, key: &str) -> Option<Arc<dyn ServiceType>> {
        ProofServices::get_service_type(self, key).await
    }

    async fn list_proof_checkers(&self) -> Vec<String> {
        ProofServices::list_proof_checkers(self).await
    }
}

impl std::fmt::Debug for ProofServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofServices")
            .field("allow_devel_only", &self.allow_devel_only)
            .finish_non_exhaustive()
    }
}
