//! Refresh Report - refresh 결과 및 통계

use crate::services::RejectedRecord;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// refresh 한 번의 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// 정책상 refresh 하지 않음
    Disabled,
    /// store entry를 가져오지 못함
    FetchFailed(String),
    /// payload envelope 파싱 실패
    DecodeFailed(String),
    /// 병합 완료 (accepted: 등록된 서비스 키, 입력 순서)
    Merged {
        accepted: Vec<String>,
        rejected: Vec<RejectedRecord>,
    },
}

impl std::fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::FetchFailed(e) => write!(f, "fetch failed: {}", e),
            Self::DecodeFailed(e) => write!(f, "decode failed: {}", e),
            Self::Merged { accepted, rejected } => write!(
                f,
                "merged {} service(s), rejected {}",
                accepted.len(),
                rejected.len()
            ),
        }
    }
}

/// refresh 보고서
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub outcome: RefreshOutcome,
    /// 가져온 entry의 해시 (fetch 성공 시)
    pub entry_hash: Option<String>,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl RefreshReport {
    pub fn is_merged(&self) -> bool {
        matches!(self.outcome, RefreshOutcome::Merged { .. })
    }

    pub fn accepted_count(&self) -> usize {
        match &self.outcome {
            RefreshOutcome::Merged { accepted, .. } => accepted.len(),
            _ => 0,
        }
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        match &self.outcome {
            RefreshOutcome::Merged { rejected, .. } => rejected,
            _ => &[],
        }
    }
}

/// 레지스트리 통계
#[derive(Debug, Clone)]
pub struct RegistryStats {
    /// 등록된 키 수
    pub keys: usize,
    /// 정책을 통과한 refresh 시도 수
    pub refresh_attempts: u64,
    /// 병합까지 완료된 refresh 수
    pub merges: u64,
    /// 마지막 시도 결과
    pub last_report: Option<RefreshReport>,
}

impl RegistryStats {
    pub fn last_entry_hash(&self) -> Option<&str> {
        self.last_report
            .as_ref()
            .and_then(|r| r.entry_hash.as_deref())
    }
}
