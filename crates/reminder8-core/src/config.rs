//! 애플리케이션 설정 구조체.
//!
//! 웹 서버 포트, 저장소 경로, 인증(비밀 키, 사용자 목록) 설정을 정의한다.
//! 시작 시 한 번 로드되어 필요한 컴포넌트에 참조로 전달된다.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self {
            web: WebConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
        }
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.web.port == 0 {
            return Err(CoreError::Config("web.port는 0일 수 없습니다".to_string()));
        }
        self.auth.validate()
    }
}

// ============================================================
// 웹 서버 설정
// ============================================================

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 포트 (기본: 8000)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
        }
    }
}

// ============================================================
// 저장소 설정
// ============================================================

/// 로컬 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite DB 파일 경로 (None이면 플랫폼 기본 경로)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

// ============================================================
// 인증 설정
// ============================================================

/// 로그인 가능한 사용자
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredential {
    /// 사용자 이름 (저장소 owner 키)
    pub username: String,
    /// 비밀번호
    pub password: String,
}

/// 인증 설정: 세션 서명 키와 사용자 테이블
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 세션 토큰 서명 키 (비어 있으면 실행 시 임의 생성)
    #[serde(default)]
    pub secret_key: String,
    /// 사용자 목록
    #[serde(default)]
    pub users: Vec<UserCredential>,
    /// 세션 유효 기간 (초, 기본: 7일)
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            users: Vec::new(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

impl AuthConfig {
    /// 사용자 이름으로 자격증명 조회
    pub fn find_user(&self, username: &str) -> Option<&UserCredential> {
        self.users.iter().find(|u| u.username == username)
    }

    /// 사용자 이름 중복/공백, 세션 기간 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.session_ttl_secs == 0 {
            return Err(CoreError::Config(
                "auth.session_ttl_secs는 0일 수 없습니다".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            if user.username.trim().is_empty() {
                return Err(CoreError::Config(
                    "auth.users에 빈 사용자 이름이 있습니다".to_string(),
                ));
            }
            if !seen.insert(user.username.as_str()) {
                return Err(CoreError::Config(format!(
                    "auth.users에 중복된 사용자 이름: {}",
                    user.username
                )));
            }
        }
        Ok(())
    }
}

fn default_web_port() -> u16 {
    8000
}
fn default_session_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}
