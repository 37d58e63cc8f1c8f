//! 리스트 관련 스토리지 메서드.

use reminder8_core::error::CoreError;
use reminder8_core::models::reminder::{ListId, ReminderItem, ReminderList};
use rusqlite::OptionalExtension;
use std::collections::HashMap;
use tracing::debug;

use super::{db_err, item_from_row, UserStorage};

impl UserStorage {
    /// 모든 리스트를 항목과 함께 생성 순으로 조회
    pub(super) fn load_lists(&self) -> Result<Vec<ReminderList>, CoreError> {
        self.read(|conn| {
            let owner = self.owner.as_str();

            let mut stmt = conn
                .prepare_cached("SELECT id, name FROM reminder_lists WHERE owner = ?1 ORDER BY id")
                .map_err(db_err("쿼리 준비 실패"))?;
            let mut lists = stmt
                .query_map(rusqlite::params![owner], |row| {
                    Ok(ReminderList {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        items: Vec::new(),
                    })
                })
                .map_err(db_err("쿼리 실행 실패"))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_err("리스트 행 읽기 실패"))?;

            let mut stmt = conn
                .prepare_cached(
                    "SELECT id, list_id, description, completed
                     FROM reminder_items
                     WHERE owner = ?1
                     ORDER BY id",
                )
                .map_err(db_err("쿼리 준비 실패"))?;
            let items = stmt
                .query_map(rusqlite::params![owner], item_from_row)
                .map_err(db_err("쿼리 실행 실패"))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_err("항목 행 읽기 실패"))?;

            let mut by_list: HashMap<ListId, Vec<ReminderItem>> = HashMap::new();
            for item in items {
                by_list.entry(item.list_id).or_default().push(item);
            }
            for list in &mut lists {
                list.items = by_list.remove(&list.id).unwrap_or_default();
            }

            Ok(lists)
        })
    }

    /// 빈 리스트 생성
    pub(super) fn insert_list(&self, name: &str) -> Result<ListId, CoreError> {
        let list_id = self.write(|tx| {
            self.ensure_owner(tx)?;

            let list_id = self.next_list_id(tx)?;

            tx.execute(
                "INSERT INTO reminder_lists (owner, id, name) VALUES (?1, ?2, ?3)",
                rusqlite::params![self.owner.as_str(), list_id, name],
            )
            .map_err(db_err("리스트 생성 실패"))?;

            Ok(list_id)
        })?;

        debug!("리스트 생성: owner={}, id={}", self.owner, list_id);
        Ok(list_id)
    }

    /// 리스트 조회 (항목 포함)
    pub(super) fn load_list(&self, list_id: ListId) -> Result<ReminderList, CoreError> {
        self.read(|conn| {
            let name: Option<String> = conn
                .query_row(
                    "SELECT name FROM reminder_lists WHERE owner = ?1 AND id = ?2",
                    rusqlite::params![self.owner.as_str(), list_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(db_err("리스트 조회 실패"))?;

            let name = name.ok_or_else(|| CoreError::list_not_found(list_id))?;
            let items = self.query_items(conn, list_id)?;

            Ok(ReminderList {
                id: list_id,
                name,
                items,
            })
        })
    }

    /// 리스트 이름 변경
    pub(super) fn rename_list(&self, list_id: ListId, name: &str) -> Result<(), CoreError> {
        let updated = self.write(|tx| {
            tx.execute(
                "UPDATE reminder_lists SET name = ?1 WHERE owner = ?2 AND id = ?3",
                rusqlite::params![name, self.owner.as_str(), list_id],
            )
            .map_err(db_err("리스트 이름 변경 실패"))
        })?;

        if updated == 0 {
            return Err(CoreError::list_not_found(list_id));
        }

        debug!("리스트 이름 변경: owner={}, id={}", self.owner, list_id);
        Ok(())
    }

    /// 리스트 삭제 (항목 삭제 + 선택 해제를 한 트랜잭션으로)
    pub(super) fn remove_list(&self, list_id: ListId) -> Result<(), CoreError> {
        let owner = self.owner.as_str();

        let items_deleted = self.write(|tx| {
            self.require_list(tx, list_id)?;

            tx.execute(
                "UPDATE owners SET selected_list_id = NULL
                 WHERE owner = ?1 AND selected_list_id = ?2",
                rusqlite::params![owner, list_id],
            )
            .map_err(db_err("선택 해제 실패"))?;

            let items_deleted = tx
                .execute(
                    "DELETE FROM reminder_items WHERE owner = ?1 AND list_id = ?2",
                    rusqlite::params![owner, list_id],
                )
                .map_err(db_err("항목 삭제 실패"))?;

            tx.execute(
                "DELETE FROM reminder_lists WHERE owner = ?1 AND id = ?2",
                rusqlite::params![owner, list_id],
            )
            .map_err(db_err("리스트 삭제 실패"))?;

            Ok(items_deleted)
        })?;

        debug!(
            "리스트 삭제: owner={}, id={}, items={}",
            self.owner, list_id, items_deleted
        );
        Ok(())
    }
}
