//! Service Collection - 소문자 키 → ServiceType 매핑

use proofreg_foundation::ServiceType;
use std::collections::HashMap;
use std::sync::Arc;

/// 키 → 서비스 매핑
///
/// 모든 키는 해당 서비스 alias의 소문자 형태이며,
/// 같은 키로 나중에 등록된 서비스가 이전 서비스를 덮어씁니다.
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    services: HashMap<String, Arc<dyn ServiceType>>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 서비스 등록
    ///
    /// `allow_devel_only`가 false면 devel 전용 서비스는 건너뜁니다.
    /// 등록된 키 수를 반환합니다.
    pub fn register<I>(&mut self, services: I, allow_devel_only: bool) -> usize
    where
        I: IntoIterator<Item = Arc<dyn ServiceType>>,
    {
        let mut registered = 0;
        for service in services {
            if !allow_devel_only && service.is_devel_only() {
                continue;
            }
            for key in service.all_string_keys() {
                self.services.insert(key.to_lowercase(), Arc::clone(&service));
                registered += 1;
            }
        }
        registered
    }

    /// 대소문자 무시 조회
    pub fn get(&self, key: &str) -> Option<Arc<dyn ServiceType>> {
        self.services.get(&key.to_lowercase()).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.services.contains_key(&key.to_lowercase())
    }

    /// 모든 키 (순서 보장 없음)
    pub fn keys(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
