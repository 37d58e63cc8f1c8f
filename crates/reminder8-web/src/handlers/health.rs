//! 헬스 체크 핸들러.

use axum::Json;
use serde::Serialize;

/// 헬스 체크 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
