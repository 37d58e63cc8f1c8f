//! Reminder8 핵심 에러 타입.
//!
//! 어댑터 crate는 자체 에러 타입에서 `From<CoreError>`로 변환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 저장소 조작, 설정, 인증, 유효성 검증 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 호출자 네임스페이스에 리소스가 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "ReminderList", "ReminderItem")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 변경 결과가 무결성 제약을 위반함
    #[error("무결성 위반: {0}")]
    IntegrityViolation(String),

    /// 저장소 접근 또는 커밋 실패 (재시도 가능)
    #[error("저장소 사용 불가: {0}")]
    StorageUnavailable(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (자격증명 오류, 세션 만료 등)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 리마인더 리스트 미발견
    pub fn list_not_found(list_id: i64) -> Self {
        Self::NotFound {
            resource_type: "ReminderList".to_string(),
            id: list_id.to_string(),
        }
    }

    /// 리마인더 항목 미발견
    pub fn item_not_found(item_id: i64) -> Self {
        Self::NotFound {
            resource_type: "ReminderItem".to_string(),
            id: item_id.to_string(),
        }
    }
}
