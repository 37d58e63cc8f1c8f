//! 항목 API 핸들러.

use axum::Json;
use reminder8_core::models::reminder::{ItemId, ListId, ReminderItem};
use reminder8_core::ports::storage::ReminderStorage;
use serde::Deserialize;

use super::Empty;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};

/// 항목 추가/설명 변경 요청 DTO
#[derive(Debug, Deserialize)]
pub struct ItemDescriptionRequest {
    /// 항목 설명
    pub description: String,
}

/// GET /api/reminders/{list_id}/items
pub async fn get_items(
    auth: AuthUser,
    ApiPath(list_id): ApiPath<ListId>,
) -> Result<Json<Vec<ReminderItem>>, ApiError> {
    Ok(Json(auth.storage.get_items(list_id).await?))
}

/// 리스트 끝에 항목 추가
///
/// POST /api/reminders/{list_id}/items
pub async fn add_item(
    auth: AuthUser,
    ApiPath(list_id): ApiPath<ListId>,
    ApiJson(req): ApiJson<ItemDescriptionRequest>,
) -> Result<Json<ReminderItem>, ApiError> {
    let item_id = auth.storage.add_item(list_id, &req.description).await?;
    Ok(Json(auth.storage.get_item(item_id).await?))
}

/// GET /api/reminders/items/{item_id}
pub async fn get_item(
    auth: AuthUser,
    ApiPath(item_id): ApiPath<ItemId>,
) -> Result<Json<ReminderItem>, ApiError> {
    Ok(Json(auth.storage.get_item(item_id).await?))
}

/// PATCH /api/reminders/items/{item_id}
pub async fn update_description(
    auth: AuthUser,
    ApiPath(item_id): ApiPath<ItemId>,
    ApiJson(req): ApiJson<ItemDescriptionRequest>,
) -> Result<Json<ReminderItem>, ApiError> {
    auth.storage
        .update_item_description(item_id, &req.description)
        .await?;
    Ok(Json(auth.storage.get_item(item_id).await?))
}

/// 완료 상태 토글
///
/// PATCH /api/reminders/items/strike/{item_id}
pub async fn strike_item(
    auth: AuthUser,
    ApiPath(item_id): ApiPath<ItemId>,
) -> Result<Json<ReminderItem>, ApiError> {
    auth.storage.strike_item(item_id).await?;
    Ok(Json(auth.storage.get_item(item_id).await?))
}

/// DELETE /api/reminders/items/{item_id}
pub async fn delete_item(auth: AuthUser, ApiPath(item_id): ApiPath<ItemId>) -> Result<Json<Empty>, ApiError> {
    auth.storage.delete_item(item_id).await?;
    Ok(Json(Empty {}))
}
