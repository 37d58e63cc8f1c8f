//! # reminder8-app
//!
//! Reminder8 서버 바이너리 진입점.
//! 설정 로드, 저장소/인증기 조립, API 서버 실행과 종료 처리.

mod lifecycle;

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use reminder8_core::config::AppConfig;
use reminder8_core::config_manager::{ConfigManager, CONFIG_FILE_NAME};
use reminder8_storage::sqlite::SqliteStorage;
use reminder8_web::auth::Authenticator;
use reminder8_web::WebServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// DB 파일 이름
const DB_FILE_NAME: &str = "reminder8.db";

/// Reminder8: 사용자별 리마인더 리스트 JSON API 서버
#[derive(Parser, Debug)]
#[command(name = "reminder8", version, about)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 서버 포트 (설정 파일 값 무시)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 데이터 저장 경로 (기본: 플랫폼 데이터 디렉토리)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 외부 접근 허용 (0.0.0.0 바인드)
    #[arg(long)]
    allow_external: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "reminder8", "reminder8")
}

/// 설정 파일 경로: `--config` > 플랫폼 설정 디렉토리 > 현재 디렉토리
fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| project_dirs().map(|p| p.config_dir().join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// DB 경로: `--data-dir` > `storage.db_path` > 플랫폼 데이터 디렉토리 > 현재 디렉토리
fn resolve_db_path(data_dir: Option<&Path>, config: &AppConfig) -> PathBuf {
    data_dir
        .map(|d| d.join(DB_FILE_NAME))
        .or_else(|| config.storage.db_path.clone())
        .or_else(|| project_dirs().map(|p| p.data_dir().join(DB_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

/// CLI 인자를 설정에 덮어쓴다
fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if args.allow_external {
        config.web.allow_external = true;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "reminder8={level},reminder8_app={level},reminder8_core={level},reminder8_storage={level},reminder8_web={level},tower_http={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("Reminder8 v{} 시작", env!("CARGO_PKG_VERSION"));

    let config_path = resolve_config_path(args.config.as_deref());
    let config_manager = ConfigManager::with_path(config_path).context("설정 로드 실패")?;
    info!("설정 파일: {}", config_manager.config_path().display());

    let config = apply_overrides(config_manager.get(), &args);
    config.validate().context("설정 검증 실패")?;

    let db_path = resolve_db_path(args.data_dir.as_deref(), &config);
    let storage = Arc::new(
        SqliteStorage::open(&db_path)
            .with_context(|| format!("DB 열기 실패: {}", db_path.display()))?,
    );
    info!("DB: {}", db_path.display());

    let auth = Arc::new(Authenticator::new(&config.auth).context("인증기 초기화 실패")?);

    let lifecycle = LifecycleManager::new();
    let server = WebServer::new(storage, auth, config.web.clone());
    let mut server_task = tokio::spawn(server.run(lifecycle.subscribe()));

    tokio::select! {
        result = lifecycle.wait_for_signal() => {
            result.context("시그널 핸들러 등록 실패")?;
        }
        result = &mut server_task => {
            // 서버가 먼저 끝났다면 바인드 실패 등 오류
            let result = result.context("서버 태스크 패닉")?;
            if let Err(e) = &result {
                error!("API 서버 실패: {e}");
            }
            return result.context("API 서버 실행 실패");
        }
    }

    server_task
        .await
        .context("서버 태스크 패닉")?
        .context("API 서버 종료 실패")?;

    info!("Reminder8 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("reminder8").chain(argv.iter().copied()))
    }

    #[test]
    fn cli_defaults() {
        let args = args(&[]);
        assert!(args.config.is_none());
        assert!(args.port.is_none());
        assert_eq!(args.log_level, "info");
        assert!(!args.allow_external);
    }

    #[test]
    fn port_override() {
        let config = apply_overrides(AppConfig::default_config(), &args(&["--port", "9001"]));
        assert_eq!(config.web.port, 9001);
        assert!(!config.web.allow_external);

        let config = apply_overrides(AppConfig::default_config(), &args(&[]));
        assert_eq!(config.web.port, 8000);
    }

    #[test]
    fn data_dir_wins_over_config() {
        let mut config = AppConfig::default_config();
        config.storage.db_path = Some(PathBuf::from("/from/config.db"));

        let path = resolve_db_path(Some(Path::new("/tmp/r8")), &config);
        assert_eq!(path, PathBuf::from("/tmp/r8").join(DB_FILE_NAME));

        let path = resolve_db_path(None, &config);
        assert_eq!(path, PathBuf::from("/from/config.db"));
    }

    #[test]
    fn explicit_config_path() {
        let path = resolve_config_path(Some(Path::new("/etc/reminder8.json")));
        assert_eq!(path, PathBuf::from("/etc/reminder8.json"));
        assert!(resolve_config_path(None).ends_with(CONFIG_FILE_NAME));
    }
}
