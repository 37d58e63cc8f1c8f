//! API 핸들러 모듈.

pub mod health;
pub mod items;
pub mod lists;
pub mod selection;
pub mod session;

use serde::Serialize;

/// 본문이 없는 성공 응답 (`{}`)
#[derive(Debug, Serialize)]
pub struct Empty {}
