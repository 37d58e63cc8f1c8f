//! # reminder8-storage
//!
//! 로컬 저장소 어댑터.
//! SQLite 기반 사용자별 리마인더 저장, 스키마 마이그레이션,
//! 기본 데모 데이터 생성을 담당한다.
//!
//! ## 모듈
//! - `sqlite`: 리마인더 저장소 (ReminderStorage 포트 구현)
//! - `migration`: 스키마 마이그레이션
//! - `seed`: 기본 리스트 재생성

pub mod migration;
pub mod seed;
pub mod sqlite;
