//! 리마인더 저장소 포트.
//!
//! 구현: `reminder8-storage` crate (rusqlite)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::reminder::{ItemId, ListDraft, ListId, ReminderItem, ReminderList};
use crate::models::user::UserId;

/// 사용자 한 명에게 바인딩된 리마인더 저장소.
///
/// 모든 연산은 핸들 생성 시 지정된 사용자 네임스페이스 안에서만 동작하며,
/// 다른 사용자의 ID를 참조하면 `CoreError::NotFound`를 반환한다.
/// 변경 연산은 반환 전에 커밋된다.
#[async_trait]
pub trait ReminderStorage: Send + Sync {
    /// 핸들이 바인딩된 사용자
    fn owner(&self) -> &UserId;

    // ============================================================
    // 리스트
    // ============================================================

    /// 모든 리스트를 항목과 함께 생성 순으로 조회
    async fn get_lists(&self) -> Result<Vec<ReminderList>, CoreError>;

    /// 빈 리스트 생성, 새 ID 반환
    async fn create_list(&self, name: &str) -> Result<ListId, CoreError>;

    /// 리스트 조회
    async fn get_list(&self, list_id: ListId) -> Result<ReminderList, CoreError>;

    /// 리스트 이름 변경
    async fn update_list_name(&self, list_id: ListId, name: &str) -> Result<(), CoreError>;

    /// 리스트와 소속 항목 삭제. 선택된 리스트였다면 선택 해제.
    async fn delete_list(&self, list_id: ListId) -> Result<(), CoreError>;

    // ============================================================
    // 항목
    // ============================================================

    /// 리스트의 항목을 삽입 순으로 조회
    async fn get_items(&self, list_id: ListId) -> Result<Vec<ReminderItem>, CoreError>;

    /// 리스트 끝에 미완료 항목 추가, 새 ID 반환
    async fn add_item(&self, list_id: ListId, description: &str) -> Result<ItemId, CoreError>;

    /// 항목 조회
    async fn get_item(&self, item_id: ItemId) -> Result<ReminderItem, CoreError>;

    /// 항목 설명 변경
    async fn update_item_description(
        &self,
        item_id: ItemId,
        description: &str,
    ) -> Result<(), CoreError>;

    /// 완료 상태 토글
    async fn strike_item(&self, item_id: ItemId) -> Result<(), CoreError>;

    /// 항목 삭제
    async fn delete_item(&self, item_id: ItemId) -> Result<(), CoreError>;

    // ============================================================
    // 선택 포인터
    // ============================================================

    /// 현재 선택된 리스트 ID
    async fn get_selected_list_id(&self) -> Result<Option<ListId>, CoreError>;

    /// 리스트 선택 (`None`이면 선택 해제). 존재하지 않는 리스트는 `NotFound`.
    async fn set_selected_list(&self, list_id: Option<ListId>) -> Result<(), CoreError>;

    /// 사용자의 모든 리스트/항목 삭제 및 선택 해제
    async fn delete_lists(&self) -> Result<(), CoreError>;

    /// 모든 리스트를 주어진 리스트들로 교체하고 첫 리스트를 선택 (한 트랜잭션).
    ///
    /// ID 시퀀스는 이어진다. `lists`가 비어 있으면 선택 해제 후 `None`.
    async fn replace_lists(&self, lists: Vec<ListDraft>) -> Result<Option<ListId>, CoreError>;
}
