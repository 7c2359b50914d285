//! Services - proof 서비스 구현
//!
//! - `builtin` - 클라이언트 내장 서비스 (github, twitter, web 등)
//! - `generic` - 원격 설정 기반 서비스
//! - `factory` - payload 파싱 및 레코드별 검증

mod builtin;
mod factory;
mod generic;

pub use builtin::{builtin_services, StaticServiceType};
pub use factory::{
    parse_service_configs, validate_records, GenericSocialProofFactory, RawServiceConfig,
    RecordOutcome, RejectedRecord, ServiceConfigFactory,
};
pub use generic::{GenericSocialProofConfig, GenericSocialProofServiceType};
