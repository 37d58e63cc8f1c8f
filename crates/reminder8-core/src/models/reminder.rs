//! 리마인더 리스트/항목 모델.

use serde::{Deserialize, Serialize};

/// 리스트 ID (사용자 네임스페이스 내 고유, 재사용 없음)
pub type ListId = i64;

/// 항목 ID (사용자 네임스페이스 내 모든 리스트에 걸쳐 고유, 재사용 없음)
pub type ItemId = i64;

/// 리마인더 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderItem {
    /// 항목 ID
    pub id: ItemId,
    /// 소속 리스트 ID
    pub list_id: ListId,
    /// 설명 (빈 문자열 허용)
    pub description: String,
    /// 완료 여부
    #[serde(default)]
    pub completed: bool,
}

/// 리마인더 리스트
///
/// `items`는 항상 추가된 순서를 유지한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderList {
    /// 리스트 ID
    pub id: ListId,
    /// 이름 (빈 문자열 허용)
    pub name: String,
    /// 항목 목록 (삽입 순)
    #[serde(default)]
    pub items: Vec<ReminderItem>,
}

/// 새로 만들 항목 (일괄 생성용)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub description: String,
    pub completed: bool,
}

/// 새로 만들 리스트와 그 항목들 (일괄 생성용)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDraft {
    pub name: String,
    pub items: Vec<ItemDraft>,
}

/// 현재 선택된 리스트
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedList {
    /// 선택된 리스트 ID (없으면 null)
    pub list_id: Option<ListId>,
}
