//! API 라우트 정의.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// 인증이 필요한 `/api` 라우트
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 리스트
        .route(
            "/reminders",
            get(handlers::lists::get_lists).post(handlers::lists::create_list),
        )
        .route(
            "/reminders/{list_id}",
            get(handlers::lists::get_list)
                .patch(handlers::lists::rename_list)
                .delete(handlers::lists::delete_list),
        )
        // 항목
        .route(
            "/reminders/{list_id}/items",
            get(handlers::items::get_items).post(handlers::items::add_item),
        )
        .route(
            "/reminders/items/{item_id}",
            get(handlers::items::get_item)
                .patch(handlers::items::update_description)
                .delete(handlers::items::delete_item),
        )
        .route(
            "/reminders/items/strike/{item_id}",
            patch(handlers::items::strike_item),
        )
        // 선택 리스트
        .route("/reminders/selected", get(handlers::selection::get_selected))
        .route(
            "/reminders/select/{list_id}",
            post(handlers::selection::select_list),
        )
        .route("/reminders/unselect", post(handlers::selection::unselect_list))
        // 일괄 작업
        .route(
            "/reminders/delete-lists",
            delete(handlers::selection::delete_lists),
        )
        .route(
            "/reminders/create-new-lists",
            post(handlers::selection::create_new_lists),
        )
}

/// 인증 없이 접근 가능한 라우트
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/login", post(handlers::session::login))
        .route("/logout", post(handlers::session::logout))
}
