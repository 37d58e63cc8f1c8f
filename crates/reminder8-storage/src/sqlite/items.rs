//! 항목 관련 스토리지 메서드.

use reminder8_core::error::CoreError;
use reminder8_core::models::reminder::{ItemId, ListId, ReminderItem};
use rusqlite::OptionalExtension;
use tracing::debug;

use super::{db_err, item_from_row, UserStorage};

impl UserStorage {
    /// 리스트의 항목 조회
    pub(super) fn load_items(&self, list_id: ListId) -> Result<Vec<ReminderItem>, CoreError> {
        self.read(|conn| {
            self.require_list(conn, list_id)?;
            self.query_items(conn, list_id)
        })
    }

    /// 리스트 끝에 항목 추가
    pub(super) fn insert_item(&self, list_id: ListId, description: &str) -> Result<ItemId, CoreError> {
        let item_id = self.write(|tx| {
            self.require_list(tx, list_id)?;
            self.ensure_owner(tx)?;

            let item_id = self.next_item_id(tx)?;

            tx.execute(
                "INSERT INTO reminder_items (owner, id, list_id, description, completed)
                 VALUES (?1, ?2, ?3, ?4, 0)",
                rusqlite::params![self.owner.as_str(), item_id, list_id, description],
            )
            .map_err(db_err("항목 추가 실패"))?;

            Ok(item_id)
        })?;

        debug!(
            "항목 추가: owner={}, list_id={}, id={}",
            self.owner, list_id, item_id
        );
        Ok(item_id)
    }

    /// 항목 조회
    pub(super) fn load_item(&self, item_id: ItemId) -> Result<ReminderItem, CoreError> {
        self.read(|conn| {
            conn.query_row(
                "SELECT id, list_id, description, completed
                 FROM reminder_items
                 WHERE owner = ?1 AND id = ?2",
                rusqlite::params![self.owner.as_str(), item_id],
                item_from_row,
            )
            .optional()
            .map_err(db_err("항목 조회 실패"))?
            .ok_or_else(|| CoreError::item_not_found(item_id))
        })
    }

    /// 항목 설명 변경
    pub(super) fn set_item_description(
        &self,
        item_id: ItemId,
        description: &str,
    ) -> Result<(), CoreError> {
        self.update_item(
            item_id,
            "UPDATE reminder_items SET description = ?3 WHERE owner = ?1 AND id = ?2",
            Some(description),
        )?;
        debug!("항목 설명 변경: owner={}, id={}", self.owner, item_id);
        Ok(())
    }

    /// 완료 상태 토글
    pub(super) fn toggle_item(&self, item_id: ItemId) -> Result<(), CoreError> {
        self.update_item(
            item_id,
            "UPDATE reminder_items SET completed = NOT completed WHERE owner = ?1 AND id = ?2",
            None,
        )?;
        debug!("항목 완료 토글: owner={}, id={}", self.owner, item_id);
        Ok(())
    }

    /// 항목 삭제
    pub(super) fn remove_item(&self, item_id: ItemId) -> Result<(), CoreError> {
        self.update_item(
            item_id,
            "DELETE FROM reminder_items WHERE owner = ?1 AND id = ?2",
            None,
        )?;
        debug!("항목 삭제: owner={}, id={}", self.owner, item_id);
        Ok(())
    }

    /// 단일 항목 대상 문장 실행. 영향받은 행이 없으면 `NotFound`.
    ///
    /// `?1` = owner, `?2` = item_id, `?3` = text (있는 경우)
    fn update_item(&self, item_id: ItemId, sql: &str, text: Option<&str>) -> Result<(), CoreError> {
        let owner = self.owner.as_str();
        let affected = self.write(|tx| {
            let result = match text {
                Some(text) => tx.execute(sql, rusqlite::params![owner, item_id, text]),
                None => tx.execute(sql, rusqlite::params![owner, item_id]),
            };
            result.map_err(db_err("항목 변경 실패"))
        })?;

        if affected == 0 {
            return Err(CoreError::item_not_found(item_id));
        }
        Ok(())
    }
}
