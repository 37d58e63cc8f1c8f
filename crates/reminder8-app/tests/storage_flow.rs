//! 스토리지 통합 테스트.
//!
//! 파일 DB 전체 흐름: 생성 → 재시작 후 조회 → 사용자 격리 → 동시 쓰기.

use assert_matches::assert_matches;
use reminder8_core::config_manager::ConfigManager;
use reminder8_core::error::CoreError;
use reminder8_core::models::user::UserId;
use reminder8_core::ports::storage::ReminderStorage;
use reminder8_storage::seed;
use reminder8_storage::sqlite::SqliteStorage;
use std::collections::HashSet;
use std::sync::Arc;

fn user(name: &str) -> UserId {
    UserId::new(name).unwrap()
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("reminder8.db");

    {
        let db = Arc::new(SqliteStorage::open(&db_path).unwrap());
        let storage = db.for_user(user("alice"));
        let list_id = storage.create_list("Chores").await.unwrap();
        storage.add_item(list_id, "Buy milk").await.unwrap();
        let dog = storage.add_item(list_id, "Walk dog").await.unwrap();
        storage.strike_item(dog).await.unwrap();
        storage.set_selected_list(Some(list_id)).await.unwrap();
    }

    let db = Arc::new(SqliteStorage::open(&db_path).unwrap());
    let storage = db.for_user(user("alice"));

    let lists = storage.get_lists().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "Chores");
    let items: Vec<_> = lists[0]
        .items
        .iter()
        .map(|i| (i.id, i.description.as_str(), i.completed))
        .collect();
    assert_eq!(items, [(1, "Buy milk", false), (2, "Walk dog", true)]);
    assert_eq!(storage.get_selected_list_id().await.unwrap(), Some(1));

    // 재시작 후에도 ID 시퀀스 이어짐
    assert_eq!(storage.create_list("next").await.unwrap(), 2);
}

#[tokio::test]
async fn seeded_users_stay_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(SqliteStorage::open(&dir.path().join("r8.db")).unwrap());
    let alice = db.for_user(user("alice"));
    let bob = db.for_user(user("bob"));

    seed::reset_to_defaults(&alice).await.unwrap();
    assert!(bob.get_lists().await.unwrap().is_empty());
    assert_eq!(bob.get_selected_list_id().await.unwrap(), None);

    bob.delete_lists().await.unwrap();
    assert_eq!(alice.get_lists().await.unwrap().len(), 3);

    let alice_first = alice.get_lists().await.unwrap()[0].id;
    assert_matches!(
        bob.set_selected_list(Some(alice_first)).await,
        Err(CoreError::NotFound { .. })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_unique_ids() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(SqliteStorage::open(&dir.path().join("r8.db")).unwrap());

    let mut handles = Vec::new();
    for n in 0..32 {
        let storage = db.for_user(user("alice"));
        handles.push(tokio::spawn(async move {
            let list_id = storage.create_list(&format!("list {n}")).await?;
            let item_id = storage.add_item(list_id, "item").await?;
            storage.set_selected_list(Some(list_id)).await?;
            Ok::<_, CoreError>((list_id, item_id))
        }));
    }

    let mut list_ids = HashSet::new();
    let mut item_ids = HashSet::new();
    for handle in handles {
        let (list_id, item_id) = handle.await.unwrap().unwrap();
        list_ids.insert(list_id);
        item_ids.insert(item_id);
    }

    assert_eq!(list_ids, (1..=32).collect::<HashSet<_>>());
    assert_eq!(item_ids, (1..=32).collect::<HashSet<_>>());

    let storage = db.for_user(user("alice"));
    let selected = storage.get_selected_list_id().await.unwrap().unwrap();
    assert!(list_ids.contains(&selected));
    assert_eq!(storage.get_lists().await.unwrap().len(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_delete_and_select_never_dangles() {
    let db = Arc::new(SqliteStorage::open_in_memory().unwrap());
    let storage = db.for_user(user("alice"));
    let ids: Vec<_> = {
        let mut ids = Vec::new();
        for n in 0..16 {
            ids.push(storage.create_list(&format!("l{n}")).await.unwrap());
        }
        ids
    };

    let mut handles = Vec::new();
    for &id in &ids {
        let selector = db.for_user(user("alice"));
        let deleter = db.for_user(user("alice"));
        handles.push(tokio::spawn(async move {
            // 삭제와 경합하면 NotFound가 날 수 있다
            let _ = selector.set_selected_list(Some(id)).await;
        }));
        handles.push(tokio::spawn(async move {
            deleter.delete_list(id).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(storage.get_lists().await.unwrap().is_empty());
    assert_eq!(storage.get_selected_list_id().await.unwrap(), None);
}

#[test]
fn hand_written_partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"auth": {"users": [{"username": "alice", "password": "pw"}]}}"#,
    )
    .unwrap();

    let config = ConfigManager::with_path(path.clone()).unwrap().get();
    assert_eq!(config.web.port, 8000);
    assert!(config.storage.db_path.is_none());
    assert!(config.auth.find_user("alice").is_some());

    // 첫 실행에 만든 파일은 다시 열어도 같은 내용
    let fresh = dir.path().join("fresh").join("config.json");
    let created = ConfigManager::with_path(fresh.clone()).unwrap().get();
    let reopened = ConfigManager::with_path(fresh).unwrap().get();
    assert_eq!(created.web.port, reopened.web.port);
    assert_eq!(created.auth.session_ttl_secs, reopened.auth.session_ttl_secs);
}
