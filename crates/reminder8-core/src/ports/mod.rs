//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate(`reminder8-storage`)가 이 trait을 구현하며,
//! 라우팅 레이어는 사용자별 핸들을 통해서만 저장소에 접근한다.
//!
//! 모든 async trait은 `async_trait` 매크로를 사용하여
//! object safety를 보장한다.

pub mod storage;
