//! Builtin Services - 클라이언트에 내장된 proof 서비스들
//!
//! 원격 설정 없이도 항상 사용 가능한 서비스 목록입니다.
//! `rooter`는 테스트용 서비스로 devel 모드에서만 등록됩니다.

use proofreg_foundation::{Error, Result, ServiceType};
use regex::Regex;
use std::sync::Arc;
use tracing::warn;

// ============================================================================
// StaticServiceType
// ============================================================================

/// 고정된 규칙을 가진 builtin proof 서비스
#[derive(Debug, Clone)]
pub struct StaticServiceType {
    key: String,
    aliases: Vec<String>,
    display_name: String,
    username_re: Regex,
    min_len: usize,
    max_len: usize,
    profile_template: Option<String>,
    devel_only: bool,
}

impl StaticServiceType {
    /// 새 서비스 생성
    ///
    /// `pattern`은 앵커 없이 전달하며 전체 문자열에 대해 검사됩니다.
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        pattern: &str,
    ) -> Result<Self> {
        let key = key.into();
        let username_re = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            Error::Validation(format!("invalid username pattern for {}: {}", key, e))
        })?;

        Ok(Self {
            aliases: Vec::new(),
            display_name: display_name.into(),
            username_re,
            min_len: 1,
            max_len: 255,
            profile_template: None,
            devel_only: false,
            key,
        })
    }

    // 빌더
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_len = min;
        self.max_len = max;
        self
    }

    pub fn profile_url_template(mut self, template: impl Into<String>) -> Self {
        self.profile_template = Some(template.into());
        self
    }

    pub fn devel_only(mut self) -> Self {
        self.devel_only = true;
        self
    }
}

impl ServiceType for StaticServiceType {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn all_string_keys(&self) -> Vec<String> {
        std::iter::once(self.key.clone())
            .chain(self.aliases.iter().cloned())
            .collect()
    }

    fn display_name(&self) -> String {
        self.display_name.clone()
    }

    fn is_devel_only(&self) -> bool {
        self.devel_only
    }

    fn normalize_username(&self, username: &str) -> Result<String> {
        let name = username.trim().to_lowercase();
        let len = name.chars().count();

        if len < self.min_len || len > self.max_len {
            return Err(Error::invalid_username(
                &self.key,
                format!(
                    "length {} not in {}..={}",
                    len, self.min_len, self.max_len
                ),
            ));
        }
        if !self.username_re.is_match(&name) {
            return Err(Error::invalid_username(
                &self.key,
                format!("'{}' has invalid characters", name),
            ));
        }
        Ok(name)
    }

    fn profile_url(&self, username: &str) -> Option<String> {
        self.profile_template
            .as_ref()
            .map(|t| t.replace("%{username}", username))
    }
}

// ============================================================================
// Builtin 목록
// ============================================================================

const HOSTNAME_RE: &str = r"(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}";

/// 내장 서비스 목록
///
/// 생성에 실패한 서비스는 로그만 남기고 제외합니다.
pub fn builtin_services() -> Vec<Arc<dyn ServiceType>> {
    let candidates: Vec<Result<StaticServiceType>> = vec![
        StaticServiceType::new("twitter", "Twitter", "[a-z0-9_]+")
            .map(|s| s.length(1, 15).profile_url_template("https://twitter.com/%{username}")),
        StaticServiceType::new("github", "GitHub", "[a-z0-9](?:[a-z0-9-]*[a-z0-9])?")
            .map(|s| s.length(1, 39).profile_url_template("https://github.com/%{username}")),
        StaticServiceType::new("reddit", "Reddit", "[a-z0-9_-]+")
            .map(|s| s.length(3, 20).profile_url_template("https://reddit.com/user/%{username}")),
        StaticServiceType::new("hackernews", "Hacker News", "[a-z0-9_-]+").map(|s| {
            s.length(2, 15)
                .profile_url_template("https://news.ycombinator.com/user?id=%{username}")
        }),
        StaticServiceType::new("facebook", "Facebook", "[a-z0-9.]+")
            .map(|s| s.length(5, 50).profile_url_template("https://facebook.com/%{username}")),
        StaticServiceType::new("web", "Website", HOSTNAME_RE)
            .map(|s| s.alias("http").alias("https").length(4, 253)),
        StaticServiceType::new("dns", "DNS", HOSTNAME_RE).map(|s| s.length(4, 253)),
        StaticServiceType::new("rooter", "Rooter", "[a-z0-9_]+").map(|s| {
            s.length(1, 20)
                .devel_only()
                .profile_url_template("https://rooter.example/%{username}")
        }),
    ];

    candidates
        .into_iter()
        .filter_map(|candidate| match candidate {
            Ok(service) => Some(Arc::new(service) as Arc<dyn ServiceType>),
            Err(e) => {
                warn!("Skipping builtin service: {}", e);
                None
            }
        })
        .collect()
}
