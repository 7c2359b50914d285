//! Static Proof Services - builtin 서비스만 담는 불변 레지스트리
//!
//! 생성 시 한 번 채워지고 이후 변경되지 않으므로 잠금 없이 공유됩니다.

use super::collection::ServiceCollection;
use async_trait::async_trait;
use proofreg_foundation::{ExternalServicesCollector, ServiceType};
use std::sync::Arc;

/// builtin 서비스 레지스트리 (테스트 / 기본 assertion 검증용)
#[derive(Debug, Clone)]
pub struct StaticProofServices {
    collection: ServiceCollection,
}

impl StaticProofServices {
    pub fn new(builtins: Vec<Arc<dyn ServiceType>>, allow_devel_only: bool) -> Self {
        let mut collection = ServiceCollection::new();
        collection.register(builtins, allow_devel_only);
        Self { collection }
    }

    /// 내장 서비스 목록으로 생성
    pub fn with_builtins(allow_devel_only: bool) -> Self {
        Self::new(crate::services::builtin_services(), allow_devel_only)
    }

    /// 대소문자 무시 조회
    pub fn lookup(&self, key: &str) -> Option<Arc<dyn ServiceType>> {
        self.collection.get(key)
    }

    /// 모든 키 (순서 보장 없음)
    pub fn list_keys(&self) -> Vec<String> {
        self.collection.keys()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

#[async_trait]
impl ExternalServicesCollector for StaticProofServices {
    async fn get_service_type(&self, key: &str) -> Option<Arc<dyn ServiceType>> {
        self.lookup(key)
    }

    async fn list_proof_checkers(&self) -> Vec<String> {
        self.list_keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let services = StaticProofServices::with_builtins(false);

        let lower = services.lookup("github").unwrap();
        let upper = services.lookup("GITHUB").unwrap();
        let mixed = services.lookup("GitHub").unwrap();
        assert!(Arc::ptr_eq(&lower, &upper));
        assert!(Arc::ptr_eq(&lower, &mixed));
        assert!(services.lookup("myspace").is_none());
    }

    #[test]
    fn test_aliases_share_descriptor() {
        let services = StaticProofServices::with_builtins(false);
        let web = services.lookup("web").unwrap();
        assert!(Arc::ptr_eq(&web, &services.lookup("HTTPS").unwrap()));
        assert!(Arc::ptr_eq(&web, &services.lookup("http").unwrap()));
    }

    #[test]
    fn test_devel_only_visibility() {
        let prod = StaticProofServices::with_builtins(false);
        assert!(prod.lookup("rooter").is_none());
        assert!(!prod.list_keys().contains(&"rooter".to_string()));

        let devel = StaticProofServices::with_builtins(true);
        assert!(devel.lookup("rooter").is_some());
        assert!(devel.list_keys().contains(&"rooter".to_string()));
        assert_eq!(devel.len(), prod.len() + 1);
    }

    #[tokio::test]
    async fn test_collector_interface() {
        let services: Arc<dyn ExternalServicesCollector> =
            Arc::new(StaticProofServices::with_builtins(false));

        assert!(services.get_service_type("Twitter").await.is_some());
        let keys = services.list_proof_checkers().await;
        assert!(keys.contains(&"dns".to_string()));
    }
}
