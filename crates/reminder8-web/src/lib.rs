//! # reminder8-web
//!
//! Reminder8 JSON API 서버.
//! Axum 기반 REST API. 요청마다 인증된 사용자의 저장소 네임스페이스로 라우팅한다.
//!
//! ## 기능
//! - 리스트/항목 CRUD
//! - 선택 리스트 관리
//! - 전체 삭제, 기본 리스트 재생성
//! - 로그인/로그아웃 (서명된 세션 토큰)

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

use axum::Router;
use reminder8_core::config::WebConfig;
use reminder8_storage::sqlite::SqliteStorage;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::auth::Authenticator;

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// SQLite 저장소 (요청마다 사용자별 핸들로 분기)
    pub storage: Arc<SqliteStorage>,
    /// 세션 인증기
    pub auth: Arc<Authenticator>,
}

/// 전체 라우터 구성 (`/api` + 공개 라우트)
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::public_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reminder8 API 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(storage: Arc<SqliteStorage>, auth: Arc<Authenticator>, config: WebConfig) -> Self {
        Self {
            config,
            state: AppState { storage, auth },
        }
    }

    /// 서버 실행
    ///
    /// 설정 포트부터 시작해 이미 사용 중이면 다음 포트를 시도한다.
    /// `MAX_PORT_ATTEMPTS`개 포트가 모두 실패하면 에러를 반환한다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let app = router(self.state);

        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let Some(port) = base_port.checked_add(attempt) else {
                break;
            };

            let addr: SocketAddr = match format!("{host}:{port}").parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {host}:{port}: {e}");
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {base_port} 사용 불가, 대체 포트 {port} 사용");
                    }
                    info!("API 서버 시작: http://{addr}");

                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("API 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("API 서버 종료");
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                    warn!("포트 {port} 이미 사용 중, 다음 포트 시도");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }
}
