//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::josa::JosaPolicy;

/// 설정 파일 오류
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 읽기/쓰기 실패
    Io(std::io::Error),
    /// JSON 파싱/직렬화 실패
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "설정 파일 입출력 오류: {}", e),
            ConfigError::Parse(e) => write!(f, "설정 파일 형식 오류: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// 검수 설정
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReviewConfig {
    /// 이상/이하/이내/이외/미만/초과 보호
    #[serde(default = "default_true")]
    pub protect_range_words: bool,
    /// 지수에 `C`가 있으면 여집합으로 읽음
    #[serde(default = "default_true")]
    pub complement_on_caret_c: bool,
    /// 수식 바로 뒤 마침표 제거
    #[serde(default = "default_true")]
    pub strip_glued_periods: bool,
    /// 수식과 조사 사이 공백 최대 글자 수
    #[serde(default = "default_max_bridge_chars")]
    pub max_bridge_chars: usize,
    /// 교정 기록 문맥 앞뒤 글자 수 (수식 검수는 +5)
    #[serde(default = "default_context_window")]
    pub context_window: usize,
    /// 추가 보호 단어
    #[serde(default)]
    pub extra_protected_words: Vec<String>,
    /// 추가 오타 (틀린 표기 → 바른 표기)
    #[serde(default)]
    pub extra_typos: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

fn default_max_bridge_chars() -> usize {
    8
}

fn default_context_window() -> usize {
    10
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            protect_range_words: default_true(),
            complement_on_caret_c: default_true(),
            strip_glued_periods: default_true(),
            max_bridge_chars: default_max_bridge_chars(),
            context_window: default_context_window(),
            extra_protected_words: Vec::new(),
            extra_typos: HashMap::new(),
        }
    }
}

impl ReviewConfig {
    /// 조사 교정 정책으로 변환
    pub fn josa_policy(&self) -> JosaPolicy {
        let mut policy = JosaPolicy::new()
            .with_range_words_protected(self.protect_range_words)
            .with_complement_on_caret_c(self.complement_on_caret_c)
            .with_glued_period_stripping(self.strip_glued_periods)
            .with_max_bridge_chars(self.max_bridge_chars)
            .with_context_window(self.context_window);
        for word in &self.extra_protected_words {
            policy = policy.with_protected_word(word.as_str());
        }
        policy
    }

    /// 수식 검수 문맥 글자 수
    pub fn inspection_window(&self) -> usize {
        self.context_window + 5
    }
}

/// 설정 파일 경로: ~/.config/mathjosa/config.json
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    home.join(".config").join("mathjosa").join("config.json")
}

/// 설정 파일 읽기
pub fn read_config(path: &Path) -> Result<ReviewConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 설정 로드 (파일 없거나 파싱 실패 시 기본값)
///
/// `path`가 없으면 기본 경로를 씁니다.
pub fn load_config(path: Option<&Path>) -> ReviewConfig {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    match read_config(&path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("설정 파일 없음, 기본값 사용: {}", path.display());
            ReviewConfig::default()
        }
        Err(e) => {
            log::warn!("설정 로드 실패, 기본값 사용 ({}): {}", path.display(), e);
            ReviewConfig::default()
        }
    }
}

/// 설정 파일 저장
pub fn save_config(config: &ReviewConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
