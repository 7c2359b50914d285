//! Core Module - 핵심 인터페이스 및 타입
//!
//! ## 타입 계층
//!
//! - `types.rs`: 데이터 타입 (StoreEntry, ParamProofServiceConfig 등)
//! - `traits.rs`: 인터페이스 (ServiceType, ParamProofStore, RefreshPolicy 등)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               ExternalServicesCollector                      │
//! │  ┌─────────────────┐        ┌─────────────────────────┐     │
//! │  │ Builtin         │        │ Remote (param proofs)   │     │
//! │  │ ServiceTypes    │        │ ParamProofStore         │     │
//! │  │ (github, web..) │        │  → ServiceConfigFactory │     │
//! │  └────────┬────────┘        └────────────┬────────────┘     │
//! │           └──────────────┬───────────────┘                  │
//! │                          ▼                                  │
//! │            key (lowercase) → Arc<dyn ServiceType>            │
//! │                          ▲                                  │
//! │                   RefreshPolicy                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod traits;
pub mod types;

// Types
pub use types::{ParamProofServiceConfig, ParamProofUsernameConfig, StoreEntry, SUPPORTED_VERSION};

// Traits
pub use traits::{ExternalServicesCollector, ParamProofStore, RefreshPolicy, ServiceType};
