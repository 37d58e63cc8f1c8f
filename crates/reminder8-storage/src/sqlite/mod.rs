//! SQLite 저장소 어댑터.
//!
//! `SqliteStorage`는 DB 연결을 소유하고, `for_user`로 얻는 `UserStorage`가
//! 사용자 한 명의 네임스페이스에 바인딩된 `ReminderStorage` 포트를 구현한다.
//!
//! # 모듈 구조
//! - `lists`: 리스트 생성/조회/이름 변경/삭제
//! - `items`: 항목 추가/조회/설명 변경/완료 토글/삭제
//! - `selection`: 선택 포인터, 전체 삭제
//! - `service`: `ReminderStorage` 포트 구현

mod items;
mod lists;
mod selection;
mod service;

use parking_lot::{Mutex, MutexGuard};
use reminder8_core::error::CoreError;
use reminder8_core::models::reminder::{ItemId, ListId, ReminderItem};
use reminder8_core::models::user::UserId;
use rusqlite::{Connection, ErrorCode, Row, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::migration;

/// 잠금 대기 한도 (다른 연결/프로세스가 쓰기 잠금을 잡고 있는 경우)
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// 파일 DB의 읽기 전용 연결 수
const READER_POOL_SIZE: usize = 4;

/// SQLite 저장소: 모든 사용자의 리마인더 데이터를 담는 DB 핸들.
///
/// 쓰기는 단일 writer 연결로 직렬화되고, 읽기는 `query_only` 연결 풀에서
/// WAL 스냅샷으로 실행되어 대기 중인 쓰기 뒤에 줄 서지 않는다.
/// 인메모리 DB는 연결을 공유할 수 없으므로 writer 하나로 모두 처리한다.
pub struct SqliteStorage {
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    writer: Mutex<Connection>,
}

impl SqliteStorage {
    /// 파일 기반 SQLite 저장소 생성
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let writer = Connection::open(path)
            .map_err(|e| CoreError::StorageUnavailable(format!("SQLite 열기 실패: {e}")))?;
        writer
            .execute_batch(
                "
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
                PRAGMA temp_store=MEMORY;
                ",
            )
            .map_err(db_err("PRAGMA 설정 실패"))?;
        Self::configure(&writer)?;
        migration::run_migrations(&writer)
            .map_err(|e| CoreError::StorageUnavailable(format!("마이그레이션 실패: {e}")))?;

        let readers = (0..READER_POOL_SIZE)
            .map(|_| Self::open_reader(path))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "SQLite 저장소 초기화: {} (읽기 연결 {}개)",
            path.display(),
            readers.len()
        );
        Ok(Self {
            readers,
            next_reader: AtomicUsize::new(0),
            writer: Mutex::new(writer),
        })
    }

    /// 인메모리 SQLite 저장소 생성 (테스트용)
    pub fn open_in_memory() -> Result<Self, CoreError> {
        let writer = Connection::open_in_memory()
            .map_err(|e| CoreError::StorageUnavailable(format!("인메모리 SQLite 생성 실패: {e}")))?;
        Self::configure(&writer)?;
        migration::run_migrations(&writer)
            .map_err(|e| CoreError::StorageUnavailable(format!("마이그레이션 실패: {e}")))?;

        Ok(Self {
            readers: Vec::new(),
            next_reader: AtomicUsize::new(0),
            writer: Mutex::new(writer),
        })
    }

    fn configure(conn: &Connection) -> Result<(), CoreError> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(db_err("PRAGMA 설정 실패"))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(db_err("busy_timeout 설정 실패"))?;
        Ok(())
    }

    fn open_reader(path: &Path) -> Result<Mutex<Connection>, CoreError> {
        let conn = Connection::open(path)
            .map_err(|e| CoreError::StorageUnavailable(format!("읽기 연결 열기 실패: {e}")))?;
        conn.execute_batch("PRAGMA query_only=ON;")
            .map_err(db_err("PRAGMA 설정 실패"))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(db_err("busy_timeout 설정 실패"))?;
        Ok(Mutex::new(conn))
    }

    /// 사용자 네임스페이스에 바인딩된 저장소 핸들 생성
    pub fn for_user(self: &Arc<Self>, owner: UserId) -> UserStorage {
        UserStorage {
            db: Arc::clone(self),
            owner,
        }
    }

    /// writer 연결 잠금
    fn lock_writer(&self) -> MutexGuard<'_, Connection> {
        self.writer.lock()
    }

    /// 읽기 연결 잠금. 비어 있는 연결을 먼저 찾고, 없으면 순번 연결을 기다린다.
    fn lock_reader(&self) -> MutexGuard<'_, Connection> {
        let count = self.readers.len();
        if count == 0 {
            return self.lock_writer();
        }

        let start = self.next_reader.fetch_add(1, Ordering::Relaxed) % count;
        for offset in 0..count {
            if let Some(guard) = self.readers[(start + offset) % count].try_lock() {
                return guard;
            }
        }
        self.readers[start].lock()
    }
}

/// 사용자 한 명에게 바인딩된 리마인더 저장소 핸들.
///
/// 복제 비용이 낮으며(Arc + 사용자 이름), 요청마다 하나씩 만들어 쓴다.
#[derive(Clone)]
pub struct UserStorage {
    db: Arc<SqliteStorage>,
    owner: UserId,
}

impl UserStorage {
    /// 바인딩된 사용자
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// 동기 저장소 작업을 블로킹 스레드 풀에서 실행
    async fn blocking<T, F>(&self, f: F) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce(&UserStorage) -> Result<T, CoreError> + Send + 'static,
    {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || f(&storage))
            .await
            .map_err(|e| CoreError::StorageUnavailable(format!("저장소 작업 실패: {e}")))?
    }

    /// 읽기 작업을 하나의 스냅샷(DEFERRED 트랜잭션) 안에서 실행
    fn read<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut conn = self.db.lock_reader();
        let tx = conn
            .transaction()
            .map_err(db_err("읽기 트랜잭션 시작 실패"))?;

        let value = f(&tx)?;

        tx.commit().map_err(db_err("읽기 트랜잭션 종료 실패"))?;
        Ok(value)
    }

    /// 쓰기 트랜잭션 실행.
    ///
    /// `IMMEDIATE`로 시작해 쓰기 잠금을 먼저 잡는다. 클로저가 에러를 반환하면
    /// 트랜잭션은 커밋되지 않고 drop 시 롤백된다.
    fn write<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut conn = self.db.lock_writer();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err("트랜잭션 시작 실패"))?;

        let value = f(&tx)?;

        tx.commit().map_err(db_err("트랜잭션 커밋 실패"))?;
        Ok(value)
    }

    /// owners 행이 없으면 생성
    fn ensure_owner(&self, tx: &Transaction<'_>) -> Result<(), CoreError> {
        tx.execute(
            "INSERT OR IGNORE INTO owners (owner) VALUES (?1)",
            rusqlite::params![self.owner.as_str()],
        )
        .map_err(db_err("사용자 행 생성 실패"))?;
        Ok(())
    }

    /// 다음 리스트 ID 할당 (owners 행이 있어야 함)
    fn next_list_id(&self, tx: &Transaction<'_>) -> Result<ListId, CoreError> {
        tx.query_row(
            "UPDATE owners SET last_list_id = last_list_id + 1
             WHERE owner = ?1
             RETURNING last_list_id",
            rusqlite::params![self.owner.as_str()],
            |row| row.get(0),
        )
        .map_err(db_err("리스트 ID 할당 실패"))
    }

    /// 다음 항목 ID 할당 (owners 행이 있어야 함)
    fn next_item_id(&self, tx: &Transaction<'_>) -> Result<ItemId, CoreError> {
        tx.query_row(
            "UPDATE owners SET last_item_id = last_item_id + 1
             WHERE owner = ?1
             RETURNING last_item_id",
            rusqlite::params![self.owner.as_str()],
            |row| row.get(0),
        )
        .map_err(db_err("항목 ID 할당 실패"))
    }

    /// 리스트 존재 여부
    fn list_exists(&self, conn: &Connection, list_id: ListId) -> Result<bool, CoreError> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM reminder_lists WHERE owner = ?1 AND id = ?2)",
            rusqlite::params![self.owner.as_str(), list_id],
            |row| row.get(0),
        )
        .map_err(db_err("리스트 조회 실패"))
    }

    /// 리스트 존재 확인, 없으면 `NotFound`
    fn require_list(&self, conn: &Connection, list_id: ListId) -> Result<(), CoreError> {
        if self.list_exists(conn, list_id)? {
            Ok(())
        } else {
            Err(CoreError::list_not_found(list_id))
        }
    }

    /// 리스트의 항목을 삽입 순으로 조회 (존재 확인 없음)
    fn query_items(&self, conn: &Connection, list_id: ListId) -> Result<Vec<ReminderItem>, CoreError> {
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, list_id, description, completed
                 FROM reminder_items
                 WHERE owner = ?1 AND list_id = ?2
                 ORDER BY id",
            )
            .map_err(db_err("쿼리 준비 실패"))?;

        let items = stmt
            .query_map(rusqlite::params![self.owner.as_str(), list_id], item_from_row)
            .map_err(db_err("쿼리 실행 실패"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err("항목 행 읽기 실패"))?;

        Ok(items)
    }
}

/// `reminder_items` 행 → `ReminderItem`
///
/// 컬럼 순서: id, list_id, description, completed
fn item_from_row(row: &Row<'_>) -> rusqlite::Result<ReminderItem> {
    Ok(ReminderItem {
        id: row.get::<_, ItemId>(0)?,
        list_id: row.get::<_, ListId>(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
    })
}

/// rusqlite 에러를 `CoreError`로 변환하는 매퍼.
///
/// 제약 위반은 `IntegrityViolation`, 나머지는 `StorageUnavailable`.
pub(crate) fn db_err(context: &'static str) -> impl FnOnce(rusqlite::Error) -> CoreError {
    move |e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => {
            CoreError::IntegrityViolation(format!("{context}: {e}"))
        }
        _ => CoreError::StorageUnavailable(format!("{context}: {e}")),
    }
}
