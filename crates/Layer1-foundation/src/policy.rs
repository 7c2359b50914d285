//! Refresh Policy - 원격 param proof 설정을 불러올지 결정
//!
//! admin feature flag, devel 실행 모드, CI 환경 중 하나라도 해당되면 refresh 합니다.

use crate::core::RefreshPolicy;
use crate::env_detect::{Environment, RunMode};

/// 환경 기반 refresh 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvRefreshPolicy {
    pub admin: bool,
    pub run_mode: RunMode,
    pub in_ci: bool,
}

impl EnvRefreshPolicy {
    pub fn new(admin: bool, run_mode: RunMode, in_ci: bool) -> Self {
        Self {
            admin,
            run_mode,
            in_ci,
        }
    }

    pub fn from_environment(env: &Environment) -> Self {
        Self::new(env.features.admin(), env.run_mode, env.in_ci)
    }
}

impl RefreshPolicy for EnvRefreshPolicy {
    fn should_refresh(&self) -> bool {
        self.admin || self.run_mode.is_devel() || self.in_ci
    }
}

/// 고정 정책 (테스트 / CLI 강제 옵션용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPolicy(pub bool);

impl FixedPolicy {
    pub fn always() -> Self {
        Self(true)
    }

    pub fn never() -> Self {
        Self(false)
    }
}

impl RefreshPolicy for FixedPolicy {
    fn should_refresh(&self) -> bool {
        self.0
    }
}
