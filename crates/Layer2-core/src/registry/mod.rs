//! # Proof Service Registry
//!
//! 문자열 키(플랫폼 이름)를 proof 서비스로 해석하는 레지스트리
//!
//! - `StaticProofServices`: builtin 서비스만, 생성 후 불변
//! - `ProofServices`: builtin + 원격 param proof 설정, Mutex 안에서 lazy refresh
//!
//! ## 사용 예시
//!
//! ```ignore
//! use proofreg_core::ProofServices;
//! use proofreg_foundation::{Environment, RegistryConfig};
//!
//! let config = RegistryConfig::load()?;
//! let env = Environment::detect(&config);
//! let services = ProofServices::from_config(&config, &env)?;
//!
//! if let Some(github) = services.get_service_type("GitHub").await {
//!     let name = github.normalize_username("Octo-Cat")?;
//! }
//! ```

mod collection;
mod dynamic;
mod report;
mod static_services;

pub use collection::ServiceCollection;
pub use dynamic::ProofServices;
pub use report::{RefreshOutcome, RefreshReport, RegistryStats};
pub use static_services::StaticProofServices;
