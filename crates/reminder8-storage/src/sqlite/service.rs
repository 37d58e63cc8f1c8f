//! `ReminderStorage` 포트 구현.
//!
//! SQLite 호출은 동기 작업이므로 `spawn_blocking`으로 런타임 워커 밖에서 실행한다.

use async_trait::async_trait;
use reminder8_core::error::CoreError;
use reminder8_core::models::reminder::{ItemId, ListDraft, ListId, ReminderItem, ReminderList};
use reminder8_core::models::user::UserId;
use reminder8_core::ports::storage::ReminderStorage;

use super::UserStorage;

#[async_trait]
impl ReminderStorage for UserStorage {
    fn owner(&self) -> &UserId {
        &self.owner
    }

    async fn get_lists(&self) -> Result<Vec<ReminderList>, CoreError> {
        self.blocking(|s| s.load_lists()).await
    }

    async fn create_list(&self, name: &str) -> Result<ListId, CoreError> {
        let name = name.to_string();
        self.blocking(move |s| s.insert_list(&name)).await
    }

    async fn get_list(&self, list_id: ListId) -> Result<ReminderList, CoreError> {
        self.blocking(move |s| s.load_list(list_id)).await
    }

    async fn update_list_name(&self, list_id: ListId, name: &str) -> Result<(), CoreError> {
        let name = name.to_string();
        self.blocking(move |s| s.rename_list(list_id, &name)).await
    }

    async fn delete_list(&self, list_id: ListId) -> Result<(), CoreError> {
        self.blocking(move |s| s.remove_list(list_id)).await
    }

    async fn get_items(&self, list_id: ListId) -> Result<Vec<ReminderItem>, CoreError> {
        self.blocking(move |s| s.load_items(list_id)).await
    }

    async fn add_item(&self, list_id: ListId, description: &str) -> Result<ItemId, CoreError> {
        let description = description.to_string();
        self.blocking(move |s| s.insert_item(list_id, &description))
            .await
    }

    async fn get_item(&self, item_id: ItemId) -> Result<ReminderItem, CoreError> {
        self.blocking(move |s| s.load_item(item_id)).await
    }

    async fn update_item_description(
        &self,
        item_id: ItemId,
        description: &str,
    ) -> Result<(), CoreError> {
        let description = description.to_string();
        self.blocking(move |s| s.set_item_description(item_id, &description))
            .await
    }

    async fn strike_item(&self, item_id: ItemId) -> Result<(), CoreError> {
        self.blocking(move |s| s.toggle_item(item_id)).await
    }

    async fn delete_item(&self, item_id: ItemId) -> Result<(), CoreError> {
        self.blocking(move |s| s.remove_item(item_id)).await
    }

    async fn get_selected_list_id(&self) -> Result<Option<ListId>, CoreError> {
        self.blocking(|s| s.load_selection()).await
    }

    async fn set_selected_list(&self, list_id: Option<ListId>) -> Result<(), CoreError> {
        self.blocking(move |s| s.store_selection(list_id)).await
    }

    async fn delete_lists(&self) -> Result<(), CoreError> {
        self.blocking(|s| s.remove_all_lists()).await
    }

    async fn replace_lists(&self, lists: Vec<ListDraft>) -> Result<Option<ListId>, CoreError> {
        self.blocking(move |s| s.replace_all_lists(&lists)).await
    }
}
