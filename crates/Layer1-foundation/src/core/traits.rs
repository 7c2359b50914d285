//! Core Traits - 핵심 인터페이스 정의
//!
//! Layer2에서 구현하는 proof 서비스 / 레지스트리 / 설정 저장소 trait들을 정의합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Layer4-CLI                                                 │
//! │  └── ExternalServicesCollector 사용 (조회 / 목록)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Layer2-Core                                                │
//! │  ├── ServiceType 구현 (builtin, generic social)             │
//! │  ├── ParamProofStore 구현 (file, http)                      │
//! │  └── ExternalServicesCollector 구현 (static, dynamic)       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Layer1-Foundation (이 레이어)                              │
//! │  └── Trait 정의, RefreshPolicy, 설정                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use super::types::StoreEntry;
use crate::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

// ============================================================================
// ServiceType - proof 서비스 인터페이스
// ============================================================================

/// 외부 플랫폼 하나의 identity proof를 다루는 서비스
///
/// 하나의 서비스는 여러 문자열 키(alias)로 조회될 수 있습니다.
pub trait ServiceType: Send + Sync + Debug {
    /// 대표 키
    fn key(&self) -> String;

    /// 조회에 사용되는 모든 키 (레지스트리가 소문자로 정규화)
    fn all_string_keys(&self) -> Vec<String> {
        vec![self.key()]
    }

    /// 표시 이름
    fn display_name(&self) -> String;

    /// devel 실행 모드에서만 사용 가능한지 여부
    fn is_devel_only(&self) -> bool {
        false
    }

    /// username 정규화 및 검증
    fn normalize_username(&self, username: &str) -> Result<String>;

    /// 프로필 URL
    fn profile_url(&self, _username: &str) -> Option<String> {
        None
    }
}

// ============================================================================
// ParamProofStore - 원격 설정 저장소
// ============================================================================

/// 서명된 param proof 설정의 최신 entry를 제공하는 저장소
///
/// 서명 검증과 타임아웃은 구현체의 책임입니다.
#[async_trait]
pub trait ParamProofStore: Send + Sync {
    /// 최신 entry 조회
    async fn get_latest_entry(&self) -> Result<StoreEntry>;
}

// ============================================================================
// RefreshPolicy - 원격 설정 refresh 여부
// ============================================================================

/// 원격 설정을 불러올지 결정하는 정책
pub trait RefreshPolicy: Send + Sync {
    fn should_refresh(&self) -> bool;
}

impl<F> RefreshPolicy for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn should_refresh(&self) -> bool {
        self()
    }
}

// ============================================================================
// ExternalServicesCollector - 레지스트리 공개 인터페이스
// ============================================================================

/// 키 → ServiceType 조회 인터페이스
///
/// 다른 컴포넌트가 호출할 수 있는 유일한 두 연산입니다.
/// 두 연산 모두 실패하지 않습니다. 모르는 키는 `None` 입니다.
#[async_trait]
pub trait ExternalServicesCollector: Send + Sync {
    /// 키로 서비스 조회 (대소문자 무시)
    async fn get_service_type(&self, key: &str) -> Option<Arc<dyn ServiceType>>;

    /// 등록된 모든 키 (순서 보장 없음)
    async fn list_proof_checkers(&self) -> Vec<String>;
}
