//! Param Proof Stores - 최신 store entry 제공자
//!
//! - `FileParamProofStore` - 로컬 파일
//! - `HttpParamProofStore` - HTTP GET (타임아웃은 클라이언트가 처리)
//! - `NoopParamProofStore` - 설정된 저장소 없음
//!
//! 서명 검증은 이 레이어에서 다루지 않습니다.

use async_trait::async_trait;
use proofreg_foundation::{Error, ParamProofStore, Result, StoreConfig, StoreEntry};
use reqwest::Client;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// payload 해시 (16자리 hex)
pub fn content_hash(content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// StoreConfig에서 저장소 선택 (path 우선)
pub fn store_from_config(config: &StoreConfig) -> Result<Arc<dyn ParamProofStore>> {
    if let Some(path) = &config.path {
        return Ok(Arc::new(FileParamProofStore::new(path)));
    }
    if let Some(url) = &config.url {
        let timeout = Duration::from_secs(config.effective_timeout());
        return Ok(Arc::new(HttpParamProofStore::new(url.clone(), timeout)?));
    }
    Ok(Arc::new(NoopParamProofStore))
}

// ============================================================================
// File
// ============================================================================

/// 로컬 파일에서 payload를 읽는 저장소
#[derive(Debug, Clone)]
pub struct FileParamProofStore {
    path: PathBuf,
}

impl FileParamProofStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ParamProofStore for FileParamProofStore {
    async fn get_latest_entry(&self) -> Result<StoreEntry> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Store(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        debug!("Read param proof entry from {} ({} bytes)", self.path.display(), content.len());
        Ok(StoreEntry::new(content_hash(&content), content))
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// HTTP GET으로 payload를 가져오는 저장소
#[derive(Debug, Clone)]
pub struct HttpParamProofStore {
    url: String,
    client: Client,
}

impl HttpParamProofStore {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!("param proof store URL must be http(s): {}", url)));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("proofreg/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ParamProofStore for HttpParamProofStore {
    async fn get_latest_entry(&self) -> Result<StoreEntry> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Store(format!("GET {} returned {}", self.url, status)));
        }

        // payload는 바이트 그대로 전달 (잘못된 UTF-8을 대체 문자로 바꾸지 않음)
        let body = response.bytes().await.map_err(|e| self.request_error(e))?;
        let content = String::from_utf8(body.to_vec()).map_err(|e| {
            Error::Store(format!("GET {} returned a non UTF-8 body: {}", self.url, e))
        })?;

        debug!("Fetched param proof entry from {} ({} bytes)", self.url, content.len());
        Ok(StoreEntry::new(content_hash(&content), content))
    }
}

impl HttpParamProofStore {
    /// 요청 / 본문 읽기 에러 변환 (클라이언트 타임아웃은 `Error::Timeout`)
    fn request_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(format!("GET {}", self.url))
        } else if e.is_body() || e.is_decode() {
            Error::Http(format!("GET {}: {}", self.url, e))
        } else {
            Error::Store(format!("GET {} failed: {}", self.url, e))
        }
    }
}

// ============================================================================
// Noop
// ============================================================================

/// 저장소가 설정되지 않은 경우
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopParamProofStore;

#[async_trait]
impl ParamProofStore for NoopParamProofStore {
    async fn get_latest_entry(&self) -> Result<StoreEntry> {
        Err(Error::Store("no param proof store configured".into()))
    }
}
