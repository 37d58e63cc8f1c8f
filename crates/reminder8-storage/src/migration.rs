//! 스키마 마이그레이션.
//!
//! 버전 기반 SQLite 스키마 관리.

use rusqlite::Connection;
use tracing::{debug, info};

/// 현재 스키마 버전
pub const CURRENT_VERSION: u32 = 1;

/// 스키마 마이그레이션 실행
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let current = get_version(conn)?;
    info!("현재 스키마 버전: {current}, 목표: {CURRENT_VERSION}");

    if current < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// 현재 스키마 버전 조회
pub fn get_version(conn: &Connection) -> Result<u32, rusqlite::Error> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
}

/// V1: owners + reminder_lists + reminder_items 테이블 생성
fn migrate_v1(conn: &Connection) -> Result<(), rusqlite::Error> {
    debug!("마이그레이션 V1 실행: 리마인더 테이블");

    conn.execute_batch(
        "
        BEGIN;

        -- 사용자별 ID 시퀀스 + 선택 포인터
        -- selected_list_id가 NULL이 아니면 반드시 존재하는 리스트를 가리킨다
        CREATE TABLE IF NOT EXISTS owners (
            owner TEXT PRIMARY KEY,
            last_list_id INTEGER NOT NULL DEFAULT 0,
            last_item_id INTEGER NOT NULL DEFAULT 0,
            selected_list_id INTEGER,
            FOREIGN KEY (owner, selected_list_id)
                REFERENCES reminder_lists(owner, id)
        );

        -- 리마인더 리스트
        CREATE TABLE IF NOT EXISTS reminder_lists (
            owner TEXT NOT NULL,
            id INTEGER NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (owner, id)
        );

        -- 리마인더 항목 (리스트 삭제 시 함께 삭제)
        CREATE TABLE IF NOT EXISTS reminder_items (
            owner TEXT NOT NULL,
            id INTEGER NOT NULL,
            list_id INTEGER NOT NULL,
            description TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (owner, id),
            FOREIGN KEY (owner, list_id)
                REFERENCES reminder_lists(owner, id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_items_owner_list ON reminder_items(owner, list_id);

        -- 버전 기록
        INSERT INTO schema_version (version) VALUES (1);

        COMMIT;
        ",
    )?;

    info!("마이그레이션 V1 완료");
    Ok(())
}
