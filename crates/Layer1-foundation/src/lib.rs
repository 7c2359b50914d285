//! # proofreg-foundation
//!
//! Foundation layer for ProofReg:
//! - Core: 핵심 Trait 정의 (ServiceType, ParamProofStore, RefreshPolicy, ExternalServicesCollector)
//! - Config: 레지스트리 설정 (RegistryConfig, StoreConfig)
//! - Environment: 실행 모드 / feature flag / CI 감지
//! - Policy: 원격 설정 refresh 정책
//! - Storage: JsonStore (설정 파일)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  RegistryConfig (global + project + env)                │
//! │                     │                                   │
//! │                     ▼                                   │
//! │   Environment (run mode, feature flags, CI)             │
//! │                     │                                   │
//! │                     ▼                                   │
//! │          RefreshPolicy::should_refresh()                │
//! │                     │                                   │
//! │          ┌─────────┴─────────┐                         │
//! │          ▼                   ▼                         │
//! │   Builtin services     ParamProofStore                 │
//! │   (static)             (file, http)                    │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod env_detect;
pub mod error;
pub mod policy;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Core (핵심 Trait 및 타입)
// ============================================================================
pub use core::{
    // Types (types.rs)
    ParamProofServiceConfig,
    ParamProofUsernameConfig,
    StoreEntry,
    SUPPORTED_VERSION,
    // Traits (traits.rs)
    ExternalServicesCollector,
    ParamProofStore,
    RefreshPolicy,
    ServiceType,
};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{RegistryConfig, StoreConfig, REGISTRY_CONFIG_FILE};

// ============================================================================
// Environment Detection (환경 감지)
// ============================================================================
pub use env_detect::{running_in_ci, Environment, FeatureFlags, RunMode};

// ============================================================================
// Policy (refresh 정책)
// ============================================================================
pub use policy::{EnvRefreshPolicy, FixedPolicy};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::{JsonStore, PROJECT_DIR};
