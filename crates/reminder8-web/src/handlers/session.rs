//! 로그인/로그아웃 핸들러.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Empty;
use crate::auth::Authenticator;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

/// 로그인 요청 DTO
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 로그인 응답 DTO
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// 세션 토큰 (`Authorization: Bearer`로 사용)
    pub token: String,
}

/// 자격증명 확인 후 세션 토큰 발급 및 세션 쿠키 설정
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let session = state.auth.login(&req.username, &req.password).map_err(|e| {
        warn!("로그인 실패: username={}", req.username);
        ApiError::from(e)
    })?;

    info!("로그인: user={}", session.user);
    let cookie = state.auth.session_cookie(&session);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            token: session.token,
        }),
    )
        .into_response())
}

/// 세션 쿠키 제거
///
/// POST /logout
pub async fn logout() -> Response {
    ([(SET_COOKIE, Authenticator::clear_cookie())], Json(Empty {})).into_response()
}
