//! 선택 리스트 및 일괄 작업 핸들러.

use axum::Json;
use reminder8_core::models::reminder::{ListId, SelectedList};
use reminder8_core::ports::storage::ReminderStorage;
use reminder8_storage::seed;
use tracing::info;

use super::Empty;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::ApiPath;

/// 선택된 리스트 ID 조회
///
/// GET /api/reminders/selected
pub async fn get_selected(auth: AuthUser) -> Result<Json<SelectedList>, ApiError> {
    let list_id = auth.storage.get_selected_list_id().await?;
    Ok(Json(SelectedList { list_id }))
}

/// POST /api/reminders/select/{list_id}
pub async fn select_list(auth: AuthUser, ApiPath(list_id): ApiPath<ListId>) -> Result<Json<Empty>, ApiError> {
    auth.storage.set_selected_list(Some(list_id)).await?;
    Ok(Json(Empty {}))
}

/// POST /api/reminders/unselect
pub async fn unselect_list(auth: AuthUser) -> Result<Json<Empty>, ApiError> {
    auth.storage.set_selected_list(None).await?;
    Ok(Json(Empty {}))
}

/// 모든 리스트 삭제
///
/// DELETE /api/reminders/delete-lists
pub async fn delete_lists(auth: AuthUser) -> Result<Json<Empty>, ApiError> {
    auth.storage.delete_lists().await?;
    info!("전체 리스트 삭제: user={}", auth.user);
    Ok(Json(Empty {}))
}

/// 모든 리스트를 기본 리스트 세트로 교체
///
/// POST /api/reminders/create-new-lists
pub async fn create_new_lists(auth: AuthUser) -> Result<Json<Empty>, ApiError> {
    seed::reset_to_defaults(&auth.storage).await?;
    Ok(Json(Empty {}))
}
