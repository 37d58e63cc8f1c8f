//! 인증: 세션 토큰 발급/검증과 사용자 추출기.
//!
//! 토큰 형식: `base64url(username|만료 unix초) . base64url(HMAC-SHA256(secret, payload))`
//!
//! 요청은 `Authorization: Bearer <token>` 헤더 또는 세션 쿠키로 인증한다.
//! 인증된 요청은 해당 사용자에게 바인딩된 `UserStorage`를 얻는다.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reminder8_core::config::{AuthConfig, UserCredential};
use reminder8_core::error::CoreError;
use reminder8_core::models::user::UserId;
use reminder8_storage::sqlite::UserStorage;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "reminder8_session";

/// 서명 키가 설정되지 않았을 때 생성하는 키 길이 (바이트)
const GENERATED_SECRET_LEN: usize = 32;

/// 발급된 세션
#[derive(Debug, Clone)]
pub struct Session {
    /// 사용자
    pub user: UserId,
    /// 서명된 토큰
    pub token: String,
}

/// 설정의 사용자 테이블과 서명 키로 요청을 사용자에 매핑한다.
pub struct Authenticator {
    secret: Vec<u8>,
    config: AuthConfig,
    session_ttl_secs: i64,
}

impl Authenticator {
    /// 인증 설정으로 생성.
    ///
    /// `secret_key`가 비어 있으면 프로세스 수명 동안만 유효한 임의 키를 만든다.
    pub fn new(config: &AuthConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let secret = if config.secret_key.is_empty() {
            warn!("auth.secret_key 미설정, 임의 키 사용 (재시작 시 세션 만료)");
            let mut key = vec![0u8; GENERATED_SECRET_LEN];
            getrandom::getrandom(&mut key)
                .map_err(|e| CoreError::Config(format!("서명 키 생성 실패: {e}")))?;
            key
        } else {
            config.secret_key.as_bytes().to_vec()
        };

        if config.users.is_empty() {
            warn!("auth.users가 비어 있음: 로그인 가능한 사용자가 없습니다");
        }

        Ok(Self {
            secret,
            config: config.clone(),
            session_ttl_secs: i64::try_from(config.session_ttl_secs).unwrap_or(i64::MAX),
        })
    }

    /// 자격증명 확인 후 세션 발급
    pub fn login(&self, username: &str, password: &str) -> Result<Session, CoreError> {
        let credential: &UserCredential = self
            .config
            .find_user(username)
            .ok_or_else(|| CoreError::Auth("사용자 이름 또는 비밀번호가 올바르지 않습니다".to_string()))?;

        if Sha256::digest(credential.password.as_bytes()) != Sha256::digest(password.as_bytes()) {
            return Err(CoreError::Auth(
                "사용자 이름 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        }

        let user = UserId::new(username)?;
        self.issue_at(user, Utc::now().timestamp())
    }

    /// 토큰 검증, 사용자 반환
    pub fn verify(&self, token: &str) -> Result<UserId, CoreError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// 로그인 응답용 `Set-Cookie` 값
    pub fn session_cookie(&self, session: &Session) -> String {
        format!(
            "{SESSION_COOKIE}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            session.token, self.session_ttl_secs
        )
    }

    /// 로그아웃 응답용 `Set-Cookie` 값 (쿠키 즉시 만료)
    pub fn clear_cookie() -> String {
        format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
    }

    fn issue_at(&self, user: UserId, now: i64) -> Result<Session, CoreError> {
        let expires_at = now.saturating_add(self.session_ttl_secs);
        let payload = URL_SAFE_NO_PAD.encode(format!("{user}|{expires_at}"));
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&payload)?.finalize().into_bytes());

        Ok(Session {
            user,
            token: format!("{payload}.{signature}"),
        })
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<UserId, CoreError> {
        let invalid = || CoreError::Auth("유효하지 않은 세션 토큰".to_string());

        let (payload, signature) = token.split_once('.').ok_or_else(invalid)?;
        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;
        self.mac(payload)?
            .verify_slice(&signature)
            .map_err(|_| invalid())?;

        let decoded = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid())?;
        let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;
        let (username, expires_at) = decoded.rsplit_once('|').ok_or_else(invalid)?;
        let expires_at: i64 = expires_at.parse().map_err(|_| invalid())?;

        if expires_at <= now {
            return Err(CoreError::Auth("세션이 만료되었습니다".to_string()));
        }
        // 설정에서 제거된 사용자의 토큰은 거부
        if self.config.find_user(username).is_none() {
            return Err(invalid());
        }

        UserId::new(username)
    }

    fn mac(&self, payload: &str) -> Result<HmacSha256, CoreError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| CoreError::Config(format!("서명 키 오류: {e}")))?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}

/// 요청 헤더에서 토큰 추출 (Bearer 우선, 없으면 세션 쿠키)
fn extract_token(parts: &Parts) -> Option<&str> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    if bearer.is_some() {
        return bearer;
    }

    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// 인증된 요청의 사용자와 사용자별 저장소 핸들
pub struct AuthUser {
    /// 인증된 사용자
    pub user: UserId,
    /// 사용자 네임스페이스에 바인딩된 저장소
    pub storage: UserStorage,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("인증 토큰이 없습니다".to_string()))?;

        let user = state.auth.verify(token).map_err(|e| {
            warn!("인증 실패: {} {} ({e})", parts.method, parts.uri.path());
            ApiError::from(e)
        })?;

        let storage = state.storage.for_user(user.clone());
        Ok(Self { user, storage })
    }
}
