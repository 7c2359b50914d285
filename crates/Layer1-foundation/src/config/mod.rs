//! Config - 레지스트리 설정
//!
//! - `registry.rs` - RegistryConfig (run mode, feature flags, param proof store)

mod registry;

pub use registry::{RegistryConfig, StoreConfig, REGISTRY_CONFIG_FILE};
