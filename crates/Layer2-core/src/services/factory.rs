//! Service Config Factory - payload 파싱 및 레코드별 검증
//!
//! store entry payload는 `{"services": [...]}` 형태입니다.
//! envelope 파싱 실패는 refresh 전체를 중단시키지만,
//! 레코드 하나의 검증 실패는 해당 레코드만 건너뜁니다.

use super::generic::{GenericSocialProofConfig, GenericSocialProofServiceType};
use proofreg_foundation::{Error, ParamProofServiceConfig, Result, ServiceType, StoreEntry};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

// ============================================================================
// RawServiceConfig - 검증 전 레코드
// ============================================================================

/// 검증 전의 원격 서비스 설정 레코드
///
/// 필드 타입이 잘못된 레코드도 envelope 파싱을 깨뜨리지 않도록
/// JSON 값 그대로 보관합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RawServiceConfig(Value);

impl RawServiceConfig {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 진단 메시지용 이름 (displayName → domain → `<unknown>`)
    pub fn display_name(&self) -> String {
        ["displayName", "domain"]
            .iter()
            .filter_map(|field| self.0.get(field).and_then(Value::as_str))
            .find(|s| !s.trim().is_empty())
            .unwrap_or("<unknown>")
            .to_string()
    }

    /// 타입이 있는 설정으로 변환
    pub fn decode(&self) -> Result<ParamProofServiceConfig> {
        ParamProofServiceConfig::deserialize(&self.0)
            .map_err(|e| Error::Validation(format!("malformed service config: {}", e)))
    }
}

#[derive(Deserialize)]
struct ProofServicesEnvelope {
    services: Vec<Value>,
}

/// store entry payload에서 레코드 목록 파싱
pub fn parse_service_configs(entry: &StoreEntry) -> Result<Vec<RawServiceConfig>> {
    let envelope: ProofServicesEnvelope = serde_json::from_slice(entry.as_bytes())
        .map_err(|e| Error::Decode(format!("invalid param proof payload: {}", e)))?;
    Ok(envelope
        .services
        .into_iter()
        .map(RawServiceConfig::new)
        .collect())
}

// ============================================================================
// ServiceConfigFactory
// ============================================================================

/// 레코드 하나를 검증하고 ServiceType을 만드는 factory
pub trait ServiceConfigFactory: Send + Sync {
    fn validate_and_build(&self, record: &RawServiceConfig) -> Result<Arc<dyn ServiceType>>;
}

impl<F> ServiceConfigFactory for F
where
    F: Fn(&RawServiceConfig) -> Result<Arc<dyn ServiceType>> + Send + Sync,
{
    fn validate_and_build(&self, record: &RawServiceConfig) -> Result<Arc<dyn ServiceType>> {
        self(record)
    }
}

/// 기본 factory: GenericSocialProofServiceType 생성
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericSocialProofFactory;

impl ServiceConfigFactory for GenericSocialProofFactory {
    fn validate_and_build(&self, record: &RawServiceConfig) -> Result<Arc<dyn ServiceType>> {
        let config = GenericSocialProofConfig::new(record.decode()?)?;
        Ok(Arc::new(GenericSocialProofServiceType::new(config)))
    }
}

// ============================================================================
// RecordOutcome - 레코드별 결과
// ============================================================================

/// 검증에 실패한 레코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// payload 내 위치
    pub index: usize,
    pub display_name: String,
    pub reason: String,
}

/// 레코드 하나의 검증 결과
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Accepted(Arc<dyn ServiceType>),
    Rejected(RejectedRecord),
}

impl RecordOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// 모든 레코드를 독립적으로 검증 (입력 순서 유지)
pub fn validate_records(
    factory: &dyn ServiceConfigFactory,
    records: &[RawServiceConfig],
) -> Vec<RecordOutcome> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match factory.validate_and_build(record) {
            Ok(service) => RecordOutcome::Accepted(service),
            Err(e) => RecordOutcome::Rejected(RejectedRecord {
                index,
                display_name: record.display_name(),
                reason: e.to_string(),
            }),
        })
        .collect()
}
