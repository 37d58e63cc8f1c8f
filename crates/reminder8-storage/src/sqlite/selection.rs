//! 선택 포인터 및 전체 삭제 스토리지 메서드.

use reminder8_core::error::CoreError;
use reminder8_core::models::reminder::{ListDraft, ListId};
use rusqlite::{OptionalExtension, Transaction};
use tracing::debug;

use super::{db_err, UserStorage};

impl UserStorage {
    /// 현재 선택된 리스트 ID
    pub(super) fn load_selection(&self) -> Result<Option<ListId>, CoreError> {
        self.read(|conn| {
            let selected: Option<Option<ListId>> = conn
                .query_row(
                    "SELECT selected_list_id FROM owners WHERE owner = ?1",
                    rusqlite::params![self.owner.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(db_err("선택 포인터 조회 실패"))?;

            Ok(selected.flatten())
        })
    }

    /// 선택 포인터 저장. 존재하지 않는 리스트는 `NotFound`.
    pub(super) fn store_selection(&self, list_id: Option<ListId>) -> Result<(), CoreError> {
        self.write(|tx| {
            if let Some(list_id) = list_id {
                self.require_list(tx, list_id)?;
            }
            self.ensure_owner(tx)?;

            tx.execute(
                "UPDATE owners SET selected_list_id = ?2 WHERE owner = ?1",
                rusqlite::params![self.owner.as_str(), list_id],
            )
            .map_err(db_err("선택 포인터 저장 실패"))?;

            Ok(())
        })?;

        debug!("리스트 선택: owner={}, list_id={:?}", self.owner, list_id);
        Ok(())
    }

    /// 사용자의 모든 리스트/항목 삭제 및 선택 해제.
    ///
    /// ID 시퀀스는 유지된다.
    pub(super) fn remove_all_lists(&self) -> Result<(), CoreError> {
        let (lists_deleted, items_deleted) = self.write(|tx| self.clear_lists(tx))?;

        debug!(
            "전체 리스트 삭제: owner={}, lists={}, items={}",
            self.owner, lists_deleted, items_deleted
        );
        Ok(())
    }

    /// 모든 리스트를 `drafts`로 교체하고 첫 리스트를 선택한다 (한 트랜잭션).
    pub(super) fn replace_all_lists(&self, drafts: &[ListDraft]) -> Result<Option<ListId>, CoreError> {
        let owner = self.owner.as_str();

        let selected = self.write(|tx| {
            self.clear_lists(tx)?;
            self.ensure_owner(tx)?;

            let mut first = None;
            for draft in drafts {
                let list_id = self.next_list_id(tx)?;
                tx.execute(
                    "INSERT INTO reminder_lists (owner, id, name) VALUES (?1, ?2, ?3)",
                    rusqlite::params![owner, list_id, draft.name],
                )
                .map_err(db_err("리스트 생성 실패"))?;

                for item in &draft.items {
                    let item_id = self.next_item_id(tx)?;
                    tx.execute(
                        "INSERT INTO reminder_items (owner, id, list_id, description, completed)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        rusqlite::params![owner, item_id, list_id, item.description, item.completed],
                    )
                    .map_err(db_err("항목 추가 실패"))?;
                }

                if first.is_none() {
                    first = Some(list_id);
                }
            }

            tx.execute(
                "UPDATE owners SET selected_list_id = ?2 WHERE owner = ?1",
                rusqlite::params![owner, first],
            )
            .map_err(db_err("선택 포인터 저장 실패"))?;

            Ok(first)
        })?;

        debug!(
            "리스트 교체: owner={}, lists={}, selected={:?}",
            self.owner,
            drafts.len(),
            selected
        );
        Ok(selected)
    }

    /// 선택 해제 후 모든 항목/리스트 삭제. (삭제된 리스트 수, 항목 수) 반환.
    fn clear_lists(&self, tx: &Transaction<'_>) -> Result<(usize, usize), CoreError> {
        let owner = self.owner.as_str();

        tx.execute(
            "UPDATE owners SET selected_list_id = NULL WHERE owner = ?1",
            rusqlite::params![owner],
        )
        .map_err(db_err("선택 해제 실패"))?;

        let items_deleted = tx
            .execute(
                "DELETE FROM reminder_items WHERE owner = ?1",
                rusqlite::params![owner],
            )
            .map_err(db_err("항목 삭제 실패"))?;

        let lists_deleted = tx
            .execute(
                "DELETE FROM reminder_lists WHERE owner = ?1",
                rusqlite::params![owner],
            )
            .map_err(db_err("리스트 삭제 실패"))?;

        Ok((lists_deleted, items_deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{memory_db, storage_for};
    use assert_matches::assert_matches;
    use reminder8_core::error::CoreError;
    use reminder8_core::models::reminder::{ItemDraft, ListDraft};
    use reminder8_core::ports::storage::ReminderStorage;

    #[tokio::test]
    async fn no_selection_by_default() {
        let storage = storage_for(&memory_db(), "alice");
        assert_eq!(storage.get_selected_list_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn select_and_unselect() {
        let storage = storage_for(&memory_db(), "alice");
        let list_id = storage.create_list("Chores").await.unwrap();

        storage.set_selected_list(Some(list_id)).await.unwrap();
        assert_eq!(storage.get_selected_list_id().await.unwrap(), Some(list_id));

        storage.set_selected_list(None).await.unwrap();
        assert_eq!(storage.get_selected_list_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn selecting_missing_list_fails() {
        let storage = storage_for(&memory_db(), "alice");
        let list_id = storage.create_list("Chores").await.unwrap();
        storage.set_selected_list(Some(list_id)).await.unwrap();

        assert_matches!(
            storage.set_selected_list(Some(5)).await,
            Err(CoreError::NotFound { .. })
        );
        // 실패한 선택은 기존 포인터를 바꾸지 않음
        assert_eq!(storage.get_selected_list_id().await.unwrap(), Some(list_id));
    }

    #[tokio::test]
    async fn unselect_without_any_state() {
        let storage = storage_for(&memory_db(), "newcomer");
        storage.set_selected_list(None).await.unwrap();
        assert_eq!(storage.get_selected_list_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_lists_is_full_reset() {
        let storage = storage_for(&memory_db(), "alice");
        let a = storage.create_list("a").await.unwrap();
        let b = storage.create_list("b").await.unwrap();
        let item = storage.add_item(b, "x").await.unwrap();
        storage.set_selected_list(Some(a)).await.unwrap();

        storage.delete_lists().await.unwrap();

        assert!(storage.get_lists().await.unwrap().is_empty());
        assert_eq!(storage.get_selected_list_id().await.unwrap(), None);
        assert_matches!(storage.get_item(item).await, Err(CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_lists_on_empty_namespace() {
        let storage = storage_for(&memory_db(), "nobody");
        storage.delete_lists().await.unwrap();
        assert!(storage.get_lists().await.unwrap().is_empty());
    }

    fn drafts(names: &[&str]) -> Vec<ListDraft> {
        names
            .iter()
            .map(|name| ListDraft {
                name: name.to_string(),
                items: vec![
                    ItemDraft {
                        description: format!("{name} 1"),
                        completed: false,
                    },
                    ItemDraft {
                        description: format!("{name} 2"),
                        completed: true,
                    },
                ],
            })
            .collect()
    }

    #[tokio::test]
    async fn replace_lists_swaps_contents_and_selects_first() {
        let storage = storage_for(&memory_db(), "alice");
        let old = storage.create_list("old").await.unwrap();
        storage.add_item(old, "stale").await.unwrap();

        let selected = storage.replace_lists(drafts(&["a", "b"])).await.unwrap();

        let lists = storage.get_lists().await.unwrap();
        let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(selected, Some(lists[0].id));
        assert_eq!(storage.get_selected_list_id().await.unwrap(), selected);
        assert!(lists[0].id > old);
        assert!(!lists[1].items[0].completed && lists[1].items[1].completed);
    }

    #[tokio::test]
    async fn replace_with_nothing_clears_selection() {
        let storage = storage_for(&memory_db(), "alice");
        let list_id = storage.create_list("a").await.unwrap();
        storage.set_selected_list(Some(list_id)).await.unwrap();

        assert_eq!(storage.replace_lists(Vec::new()).await.unwrap(), None);
        assert!(storage.get_lists().await.unwrap().is_empty());
        assert_eq!(storage.get_selected_list_id().await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_replaces_do_not_interleave() {
        let db = memory_db();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let storage = storage_for(&db, "alice");
            handles.push(tokio::spawn(async move {
                storage.replace_lists(drafts(&["x", "y", "z"])).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let storage = storage_for(&db, "alice");
        let lists = storage.get_lists().await.unwrap();
        assert_eq!(lists.len(), 3);
        assert!(lists.iter().all(|l| l.items.len() == 2));
        assert_eq!(storage.get_selected_list_id().await.unwrap(), Some(lists[0].id));
    }
}
