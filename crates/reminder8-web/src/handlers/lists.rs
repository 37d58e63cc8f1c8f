//! 리스트 API 핸들러.

use axum::Json;
use reminder8_core::models::reminder::{ListId, ReminderList};
use reminder8_core::ports::storage::ReminderStorage;
use serde::Deserialize;

use super::Empty;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};

/// 리스트 생성/이름 변경 요청 DTO
#[derive(Debug, Deserialize)]
pub struct ListNameRequest {
    /// 리스트 이름
    pub name: String,
}

/// 모든 리스트 조회 (항목 포함)
///
/// GET /api/reminders
pub async fn get_lists(auth: AuthUser) -> Result<Json<Vec<ReminderList>>, ApiError> {
    Ok(Json(auth.storage.get_lists().await?))
}

/// 리스트 생성
///
/// POST /api/reminders
pub async fn create_list(
    auth: AuthUser,
    ApiJson(req): ApiJson<ListNameRequest>,
) -> Result<Json<ReminderList>, ApiError> {
    let list_id = auth.storage.create_list(&req.name).await?;
    Ok(Json(auth.storage.get_list(list_id).await?))
}

/// 리스트 조회
///
/// GET /api/reminders/{list_id}
pub async fn get_list(
    auth: AuthUser,
    ApiPath(list_id): ApiPath<ListId>,
) -> Result<Json<ReminderList>, ApiError> {
    Ok(Json(auth.storage.get_list(list_id).await?))
}

/// 리스트 이름 변경
///
/// PATCH /api/reminders/{list_id}
pub async fn rename_list(
    auth: AuthUser,
    ApiPath(list_id): ApiPath<ListId>,
    ApiJson(req): ApiJson<ListNameRequest>,
) -> Result<Json<ReminderList>, ApiError> {
    auth.storage.update_list_name(list_id, &req.name).await?;
    Ok(Json(auth.storage.get_list(list_id).await?))
}

/// 리스트 삭제 (항목 포함)
///
/// DELETE /api/reminders/{list_id}
pub async fn delete_list(auth: AuthUser, ApiPath(list_id): ApiPath<ListId>) -> Result<Json<Empty>, ApiError> {
    auth.storage.delete_list(list_id).await?;
    Ok(Json(Empty {}))
}
