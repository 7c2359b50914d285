//! proofreg-core: Core Runtime for ProofReg
//!
//! Layer2 - proof 서비스 구현 및 레지스트리
//!
//! # 주요 모듈
//!
//! - `services`: builtin 서비스, 원격 설정 기반 서비스, 레코드 검증
//! - `store`: param proof store 구현 (file, http)
//! - `registry`: StaticProofServices, ProofServices
//!
//! # 사용 예시
//!
//! ```ignore
//! use proofreg_core::{ProofServices, FileParamProofStore, builtin_services};
//! use proofreg_foundation::FixedPolicy;
//!
//! let services = ProofServices::new(
//!     builtin_services(),
//!     false,
//!     Arc::new(FileParamProofStore::new("paramproofs.json")),
//!     Arc::new(FixedPolicy::always()),
//! );
//!
//! let keys = services.list_proof_checkers().await;
//! ```

pub mod registry;
pub mod services;
pub mod store;

// Re-exports: Registry
pub use registry::{
    ProofServices, RefreshOutcome, RefreshReport, RegistryStats, ServiceCollection,
    StaticProofServices,
};

// Re-exports: Services
pub use services::{
    builtin_services, parse_service_configs, validate_records, GenericSocialProofConfig,
    GenericSocialProofFactory, GenericSocialProofServiceType, RawServiceConfig, RecordOutcome,
    RejectedRecord, ServiceConfigFactory, StaticServiceType,
};

// Re-exports: Store
pub use store::{
    content_hash, store_from_config, FileParamProofStore, HttpParamProofStore, NoopParamProofStore,
};
