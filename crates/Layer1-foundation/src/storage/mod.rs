//! Storage - 설정 저장소
//!
//! - `json/` - JSON 파일 저장소 (글로벌 / 프로젝트)

mod json;

pub use json::{JsonStore, PROJECT_DIR};
