//! 기본 리스트 재생성.
//!
//! 사용자의 모든 리스트를 지우고 고정된 데모 리스트 세트를 다시 만든다.
//! 포트만 사용하므로 어떤 `ReminderStorage` 구현에도 동작한다.

use reminder8_core::error::CoreError;
use reminder8_core::models::reminder::{ItemDraft, ListDraft, ListId};
use reminder8_core::ports::storage::ReminderStorage;
use tracing::info;

/// 기본 리스트 정의: (이름, [(설명, 완료 여부)])
const DEFAULT_LISTS: &[(&str, &[(&str, bool)])] = &[
    (
        "Chores",
        &[
            ("Wash the dishes", false),
            ("Vacuum the living room", false),
            ("Take out the trash", true),
            ("Water the plants", true),
            ("Do the laundry", false),
        ],
    ),
    (
        "Groceries",
        &[
            ("Milk", false),
            ("Eggs", false),
            ("Bread", false),
            ("Apples", false),
            ("Coffee", false),
            ("Cheese", false),
        ],
    ),
    (
        "Projects",
        &[
            ("Set up the repository", true),
            ("Write the API", false),
            ("Deploy the service", false),
        ],
    ),
];

/// 모든 리스트를 삭제하고 기본 리스트 세트를 생성한다.
///
/// 삭제와 생성은 저장소의 한 트랜잭션에서 일어나므로 동시에 재생성해도
/// 결과가 섞이지 않는다. 첫 번째 리스트("Chores")가 선택되며, 그 ID를 반환한다.
pub async fn reset_to_defaults(storage: &dyn ReminderStorage) -> Result<ListId, CoreError> {
    let drafts = DEFAULT_LISTS
        .iter()
        .map(|(name, items)| ListDraft {
            name: (*name).to_string(),
            items: items
                .iter()
                .map(|(description, completed)| ItemDraft {
                    description: (*description).to_string(),
                    completed: *completed,
                })
                .collect(),
        })
        .collect();

    let selected = storage.replace_lists(drafts).await?.ok_or_else(|| {
        CoreError::IntegrityViolation("기본 리스트 정의가 비어 있습니다".to_string())
    })?;
    info!("기본 리스트 재생성: owner={}", storage.owner());
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteStorage;
    use reminder8_core::models::user::UserId;
    use std::sync::Arc;

    #[tokio::test]
    async fn reset_replaces_existing_lists() {
        let db = Arc::new(SqliteStorage::open_in_memory().unwrap());
        let storage = db.for_user(UserId::new("alice").unwrap());

        let old = storage.create_list("old").await.unwrap();
        storage.add_item(old, "stale").await.unwrap();

        let chores = reset_to_defaults(&storage).await.unwrap();

        let lists = storage.get_lists().await.unwrap();
        let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Chores", "Groceries", "Projects"]);
        assert_eq!(storage.get_selected_list_id().await.unwrap(), Some(chores));
        assert_eq!(lists[0].id, chores);

        assert_eq!(lists[0].items.len(), 5);
        assert_eq!(lists[0].items.iter().filter(|i| i.completed).count(), 2);
        assert!(lists[0].items[2].completed && lists[0].items[3].completed);
        assert_eq!(lists[1].items.len(), 6);
        assert!(lists[1].items.iter().all(|i| !i.completed));
        assert_eq!(lists[2].items.len(), 3);
        assert!(lists[2].items[0].completed);
    }

    #[tokio::test]
    async fn reset_twice_keeps_ids_monotonic() {
        let db = Arc::new(SqliteStorage::open_in_memory().unwrap());
        let storage = db.for_user(UserId::new("alice").unwrap());

        let first = reset_to_defaults(&storage).await.unwrap();
        let second = reset_to_defaults(&storage).await.unwrap();
        assert!(second > first);
        assert_eq!(storage.get_lists().await.unwrap().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_resets_leave_one_default_set() {
        let db = Arc::new(SqliteStorage::open_in_memory().unwrap());
        let storage = db.for_user(UserId::new("alice").unwrap());

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let storage = storage.clone();
                tokio::spawn(async move { reset_to_defaults(&storage).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let lists = storage.get_lists().await.unwrap();
        let sizes: Vec<_> = lists.iter().map(|l| l.items.len()).collect();
        assert_eq!(sizes, [5, 6, 3]);
        assert_eq!(storage.get_selected_list_id().await.unwrap(), Some(lists[0].id));
    }
}
