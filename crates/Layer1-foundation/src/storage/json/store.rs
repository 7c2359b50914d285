//! 레지스트리 설정 파일 저장소
//!
//! 글로벌(`<config_dir>/proofreg/`)과 프로젝트(`.proofreg/`) 두 위치에서
//! `registry.json` 같은 JSON 파일을 읽습니다. 모든 실패는 `Error::Config`로
//! 변환되며 메시지에 파일 경로가 포함됩니다.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 프로젝트 설정 디렉토리 이름
pub const PROJECT_DIR: &str = ".proofreg";

/// 글로벌 설정 디렉토리 이름 (`dirs::config_dir()` 하위)
const GLOBAL_DIR: &str = "proofreg";

/// 설정 디렉토리 하나를 가리키는 JSON 저장소
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// `<config_dir>/proofreg/`
    pub fn global() -> Result<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(GLOBAL_DIR)))
            .ok_or_else(|| Error::Config("no user config directory on this platform".into()))
    }

    /// `<root>/.proofreg/`
    pub fn project(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(PROJECT_DIR))
    }

    /// 작업 디렉토리 기준 프로젝트 저장소
    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| config_error("<cwd>", "resolve", e))?;
        Ok(Self::project(cwd))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).is_file()
    }

    /// 파일을 읽어 역직렬화 (파일이 없으면 에러)
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.file_path(filename);
        let raw = std::fs::read(&path).map_err(|e| config_error(&path, "read", e))?;
        serde_json::from_slice(&raw).map_err(|e| config_error(&path, "parse", e))
    }

    /// 파일이 없으면 `None`
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        if self.exists(filename) {
            self.load(filename).map(Some)
        } else {
            Ok(None)
        }
    }
}

fn config_error(path: impl AsRef<Path>, action: &str, cause: impl Display) -> Error {
    Error::Config(format!(
        "failed to {} {}: {}",
        action,
        path.as_ref().display(),
        cause
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_project_store_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::project(dir.path());
        assert!(store.base_dir().ends_with(PROJECT_DIR));
        assert!(!store.exists("sample.json"));

        std::fs::create_dir_all(store.base_dir()).unwrap();
        std::fs::write(store.file_path("sample.json"), r#"{"name":"github"}"#).unwrap();

        assert!(store.exists("sample.json"));
        assert_eq!(
            store.load::<Sample>("sample.json").unwrap(),
            Sample { name: "github".into() }
        );
    }

    #[test]
    fn test_load_optional_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        assert!(store.load_optional::<Sample>("missing.json").unwrap().is_none());
    }

    #[test]
    fn test_load_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        std::fs::write(store.file_path("bad.json"), "{ not json").unwrap();

        match store.load::<Sample>("bad.json").unwrap_err() {
            Error::Config(msg) => assert!(msg.contains("failed to parse"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
