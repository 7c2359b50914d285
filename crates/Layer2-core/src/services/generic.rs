//! Generic Social Proof - 원격 설정으로 정의되는 proof 서비스
//!
//! param proof store의 레코드 하나를 검증해 `GenericSocialProofConfig`를 만들고,
//! 이를 감싼 `GenericSocialProofServiceType`이 레지스트리에 등록됩니다.

use proofreg_foundation::{Error, ParamProofServiceConfig, Result, ServiceType, SUPPORTED_VERSION};
use regex::Regex;

const USERNAME_VAR: &str = "%{username}";
const SIG_HASH_VAR: &str = "%{sig_hash}";

// ============================================================================
// GenericSocialProofConfig - 검증된 설정
// ============================================================================

/// 검증을 통과한 원격 서비스 설정
#[derive(Debug, Clone)]
pub struct GenericSocialProofConfig {
    config: ParamProofServiceConfig,
    username_re: Regex,
}

impl GenericSocialProofConfig {
    /// 레코드 검증
    pub fn new(config: ParamProofServiceConfig) -> Result<Self> {
        if config.version < 1 || config.version > SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion {
                version: config.version,
                supported: SUPPORTED_VERSION,
            });
        }

        let domain = config.domain.trim();
        if domain.is_empty() {
            return Err(Error::Validation("domain is empty".into()));
        }
        if domain.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(Error::Validation(format!("invalid domain '{}'", domain)));
        }
        if config.display_name.trim().is_empty() {
            return Err(Error::Validation(format!("{}: displayName is empty", domain)));
        }

        let username = &config.username;
        if username.min == 0 || username.min > username.max {
            return Err(Error::Validation(format!(
                "{}: invalid username length bounds {}..={}",
                domain, username.min, username.max
            )));
        }
        if username.re.is_empty() {
            return Err(Error::Validation(format!("{}: username regex is empty", domain)));
        }
        let username_re = Regex::new(&format!("^(?:{})$", username.re)).map_err(|e| {
            Error::Validation(format!("{}: invalid username regex: {}", domain, e))
        })?;

        check_url(domain, "prefillUrl", &config.prefill_url, &[USERNAME_VAR, SIG_HASH_VAR])?;
        check_url(domain, "profileUrl", &config.profile_url, &[USERNAME_VAR])?;
        check_url(domain, "checkUrl", &config.check_url, &[USERNAME_VAR])?;

        if config.check_path.is_empty() {
            return Err(Error::Validation(format!("{}: checkPath is empty", domain)));
        }

        Ok(Self {
            config,
            username_re,
        })
    }

    pub fn domain(&self) -> &str {
        self.config.domain.trim()
    }

    pub fn display_name(&self) -> &str {
        &self.config.display_name
    }

    pub fn raw(&self) -> &ParamProofServiceConfig {
        &self.config
    }

    /// proof 확인 URL
    pub fn check_url(&self, username: &str) -> String {
        self.config.check_url.replace(USERNAME_VAR, username)
    }

    /// proof 작성 URL
    pub fn prefill_url(&self, username: &str, sig_hash: &str) -> String {
        self.config
            .prefill_url
            .replace(USERNAME_VAR, username)
            .replace(SIG_HASH_VAR, sig_hash)
    }
}

fn check_url(domain: &str, field: &str, url: &str, required: &[&str]) -> Result<()> {
    if !url.starts_with("https://") {
        return Err(Error::Validation(format!(
            "{}: {} must be an https URL",
            domain, field
        )));
    }
    for var in required {
        if !url.contains(var) {
            return Err(Error::Validation(format!(
                "{}: {} is missing {}",
                domain, field, var
            )));
        }
    }
    Ok(())
}

// ============================================================================
// GenericSocialProofServiceType
// ============================================================================

/// 원격 설정 기반 proof 서비스
#[derive(Debug, Clone)]
pub struct GenericSocialProofServiceType {
    config: GenericSocialProofConfig,
}

impl GenericSocialProofServiceType {
    pub fn new(config: GenericSocialProofConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenericSocialProofConfig {
        &self.config
    }
}

impl ServiceType for GenericSocialProofServiceType {
    fn key(&self) -> String {
        self.config.domain().to_lowercase()
    }

    fn display_name(&self) -> String {
        self.config.display_name().to_string()
    }

    fn normalize_username(&self, username: &str) -> Result<String> {
        let name = username.trim().to_lowercase();
        let bounds = &self.config.raw().username;
        let len = name.chars().count();

        if len < bounds.min || len > bounds.max {
            return Err(Error::invalid_username(
                self.key(),
                format!("length {} not in {}..={}", len, bounds.min, bounds.max),
            ));
        }
        if !self.config.username_re.is_match(&name) {
            return Err(Error::invalid_username(
                self.key(),
                format!("'{}' does not match the service username rules", name),
            ));
        }
        Ok(name)
    }

    fn profile_url(&self, username: &str) -> Option<String> {
        Some(self.config.raw().profile_url.replace(USERNAME_VAR, username))
    }
}
