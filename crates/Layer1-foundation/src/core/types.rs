//! Core Types - 데이터 타입 정의

use serde::{Deserialize, Serialize};

/// 이 클라이언트가 지원하는 param proof 설정 버전
pub const SUPPORTED_VERSION: i64 = 1;

// ============================================================================
// StoreEntry - param proof store의 최신 entry
// ============================================================================

/// param proof store에서 가져온 최신 설정 스냅샷
///
/// `entry`는 변경 없이 그대로 전달되는 JSON payload 입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    /// payload 해시 (버전 식별용)
    pub hash: String,
    /// JSON payload
    pub entry: String,
}

impl StoreEntry {
    pub fn new(hash: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            entry: entry.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.entry.as_bytes()
    }
}

// ============================================================================
// ParamProofServiceConfig - 원격 서비스 설정 레코드
// ============================================================================

/// Username 규칙
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamProofUsernameConfig {
    /// 정규식 (앵커 없이)
    #[serde(default)]
    pub re: String,
    /// 최소 길이
    #[serde(default)]
    pub min: usize,
    /// 최대 길이
    #[serde(default)]
    pub max: usize,
}

/// 원격으로 설정되는 proof 서비스 하나의 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamProofServiceConfig {
    #[serde(default)]
    pub version: i64,
    /// 서비스 도메인 (레지스트리 키)
    #[serde(default)]
    pub domain: String,
    /// 표시 이름
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub username: ParamProofUsernameConfig,
    #[serde(default)]
    pub brand_color: String,
    /// proof 작성 페이지 (`%{username}`, `%{sig_hash}` 포함)
    #[serde(default)]
    pub prefill_url: String,
    /// 프로필 페이지 (`%{username}` 포함)
    #[serde(default)]
    pub profile_url: String,
    /// proof 확인 API (`%{username}` 포함)
    #[serde(default)]
    pub check_url: String,
    /// check 응답에서 proof 목록까지의 경로
    #[serde(default)]
    pub check_path: Vec<String>,
    #[serde(default)]
    pub avatar_path: Vec<String>,
}
