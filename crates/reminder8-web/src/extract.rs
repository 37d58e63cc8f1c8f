//! 요청 추출기.
//!
//! 경로 파라미터나 JSON 본문을 해석하지 못하면 axum 기본 텍스트 응답 대신
//! `ApiError::BadRequest`의 JSON 에러 본문으로 응답한다.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// `axum::Json` 본문 추출기 (거부 시 `ApiError`)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` 추출기 (거부 시 `ApiError`)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
