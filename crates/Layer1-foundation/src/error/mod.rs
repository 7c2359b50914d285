//! Error types for ProofReg
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ProofReg 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Param proof store 관련
    // ========================================================================
    #[error("Store error: {0}")]
    Store(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // ========================================================================
    // 서비스 설정 검증 관련
    // ========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported config version {version} (supported: {supported})")]
    UnsupportedVersion { version: i64, supported: i64 },

    #[error("Invalid username for {service}: {message}")]
    InvalidUsername { service: String, message: String },
}

impl Error {
    /// Username 검증 에러 생성 헬퍼
    pub fn invalid_username(service: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidUsername {
            service: service.into(),
            message: message.into(),
        }
    }
}
