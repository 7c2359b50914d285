//! Registry Config - proof service 레지스트리 설정
//!
//! 글로벌 → 프로젝트 → 환경변수 순서로 병합합니다.

use crate::env_detect::RunMode;
use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 설정 파일명
pub const REGISTRY_CONFIG_FILE: &str = "registry.json";

/// 환경변수 이름
const ENV_RUN_MODE: &str = "PROOFREG_RUN_MODE";
const ENV_FEATURES: &str = "PROOFREG_FEATURES";
const ENV_STORE_PATH: &str = "PROOFREG_STORE_PATH";
const ENV_STORE_URL: &str = "PROOFREG_STORE_URL";
const ENV_DEVEL_CHECKERS: &str = "PROOFREG_DEVEL_CHECKERS";

// ============================================================================
// Registry Config
// ============================================================================

/// 레지스트리 통합 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 실행 모드 (devel / staging / prod)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_mode: Option<RunMode>,

    /// Feature flags (`admin` 이면 remote 설정을 불러옴)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,

    /// devel 전용 proof checker 허용 여부 (미지정 시 run mode로 결정)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_devel_checkers: Option<bool>,

    /// Param proof store 설정
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            run_mode: None,
            features: Vec::new(),
            allow_devel_checkers: None,
            store: StoreConfig::default(),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// 글로벌 + 프로젝트 + 환경변수 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정 (~/.config/proofreg/registry.json)
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) =
                global.load_optional::<RegistryConfig>(REGISTRY_CONFIG_FILE)?
            {
                debug!("Loaded global registry config from {}", global.base_dir().display());
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정 (.proofreg/registry.json)
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) =
                project.load_optional::<RegistryConfig>(REGISTRY_CONFIG_FILE)?
            {
                debug!("Loaded project registry config from {}", project.base_dir().display());
                config.merge(project_config);
            }
        }

        // 3. 환경변수 오버라이드
        config.apply_env_overrides();

        Ok(config)
    }

    /// 특정 저장소에서만 로드
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        Ok(store
            .load_optional::<RegistryConfig>(REGISTRY_CONFIG_FILE)?
            .unwrap_or_default())
    }

    /// 환경변수 오버라이드
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_with(|key| std::env::var(key).ok());
    }

    /// 환경변수 조회 함수를 주입받는 오버라이드
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_RUN_MODE) {
            match RunMode::parse(&mode) {
                Some(mode) => self.run_mode = Some(mode),
                None => debug!("Ignoring unknown {}={}", ENV_RUN_MODE, mode),
            }
        }

        if let Some(features) = lookup(ENV_FEATURES) {
            for flag in features.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                if !self.features.iter().any(|f| f.eq_ignore_ascii_case(flag)) {
                    self.features.push(flag.to_string());
                }
            }
        }

        if let Some(path) = lookup(ENV_STORE_PATH).filter(|p| !p.is_empty()) {
            self.store.path = Some(path);
        }

        if let Some(url) = lookup(ENV_STORE_URL).filter(|u| !u.is_empty()) {
            self.store.url = Some(url);
        }

        if let Some(value) = lookup(ENV_DEVEL_CHECKERS) {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.allow_devel_checkers = Some(true),
                "0" | "false" | "no" => self.allow_devel_checkers = Some(false),
                _ => debug!("Ignoring unknown {}={}", ENV_DEVEL_CHECKERS, value),
            }
        }
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: RegistryConfig) {
        self.version = other.version;
        if other.run_mode.is_some() {
            self.run_mode = other.run_mode;
        }
        for flag in other.features {
            if !self.features.iter().any(|f| f.eq_ignore_ascii_case(&flag)) {
                self.features.push(flag);
            }
        }
        if other.allow_devel_checkers.is_some() {
            self.allow_devel_checkers = other.allow_devel_checkers;
        }
        self.store.merge(other.store);
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn run_mode(mut self, mode: RunMode) -> Self {
        self.run_mode = Some(mode);
        self
    }

    pub fn feature(mut self, flag: impl Into<String>) -> Self {
        self.features.push(flag.into());
        self
    }

    pub fn allow_devel_checkers(mut self, allow: bool) -> Self {
        self.allow_devel_checkers = Some(allow);
        self
    }

    pub fn store_path(mut self, path: impl Into<String>) -> Self {
        self.store.path = Some(path.into());
        self
    }

    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.store.url = Some(url.into());
        self
    }
}

// ============================================================================
// Store Config
// ============================================================================

/// Param proof store 설정
///
/// `path`가 있으면 파일, `url`이 있으면 HTTP에서 최신 entry를 가져옵니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// 로컬 파일 경로
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// 원격 URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// 요청 타임아웃 (초)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl StoreConfig {
    /// 기본 타임아웃 (초)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn effective_timeout(&self) -> u64 {
        self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS)
    }

    pub fn merge(&mut self, other: StoreConfig) {
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

fn default_version() -> u32 {
    1
}
