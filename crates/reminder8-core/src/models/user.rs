//! 사용자 식별자.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// 인증된 사용자 식별자.
///
/// 모든 저장소 테이블의 파티션 키(`owner`)로 사용된다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// 사용자 이름으로 식별자 생성 (공백뿐인 이름 거부)
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "username".to_string(),
                message: "사용자 이름이 비어 있습니다".to_string(),
            });
        }
        Ok(Self(name))
    }

    /// 문자열 참조 반환
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}
