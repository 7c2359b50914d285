//! Environment Detection - 실행 모드 / feature flag / CI 감지
//!
//! remote param proof 설정을 불러올지 결정하는 데 필요한 환경 정보를 제공합니다.

use crate::config::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;

/// CI 환경을 나타내는 환경변수들
const CI_ENV_VARS: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "JENKINS_URL",
    "TRAVIS",
];

/// 실행 모드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Devel,
    Staging,
    #[default]
    Prod,
}

impl RunMode {
    /// 문자열 파싱 (대소문자 무시)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "devel" | "development" => Some(Self::Devel),
            "staging" => Some(Self::Staging),
            "prod" | "production" => Some(Self::Prod),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Devel => "devel",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }

    pub fn is_devel(&self) -> bool {
        matches!(self, Self::Devel)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Feature flag 집합 (소문자 정규화)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    flags: BTreeSet<String>,
}

impl FeatureFlags {
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            flags: flags
                .into_iter()
                .map(|f| f.as_ref().trim().to_lowercase())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// 콤마로 구분된 문자열에서 파싱
    pub fn parse(s: &str) -> Self {
        Self::new(s.split(','))
    }

    pub fn has(&self, flag: &str) -> bool {
        self.flags.contains(&flag.to_lowercase())
    }

    pub fn admin(&self) -> bool {
        self.has("admin")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// CI 환경에서 실행 중인지 확인
pub fn running_in_ci() -> bool {
    running_in_ci_with(|key| env::var(key).ok())
}

/// 환경변수 조회 함수를 주입받는 CI 감지
pub fn running_in_ci_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    CI_ENV_VARS.iter().any(|key| match lookup(key) {
        Some(value) => {
            let value = value.trim().to_lowercase();
            !value.is_empty() && value != "false" && value != "0"
        }
        None => false,
    })
}

/// 전체 환경 정보
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub run_mode: RunMode,
    pub features: FeatureFlags,
    pub in_ci: bool,
}

impl Environment {
    /// 설정 + 프로세스 환경에서 감지
    pub fn detect(config: &RegistryConfig) -> Self {
        Self {
            run_mode: config.run_mode.unwrap_or_default(),
            features: FeatureFlags::new(&config.features),
            in_ci: running_in_ci(),
        }
    }

    /// devel 전용 proof checker 허용 여부
    ///
    /// 설정에 명시되지 않았으면 devel 모드에서만 허용합니다.
    pub fn allow_devel_checkers(&self, config: &RegistryConfig) -> bool {
        config
            .allow_devel_checkers
            .unwrap_or_else(|| self.run_mode.is_devel())
    }
}
