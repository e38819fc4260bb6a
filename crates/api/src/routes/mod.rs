pub mod cast_member;
pub mod category;
pub mod genre;
pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                          index, store
/// /categories/{id}                     show, update, destroy
/// /categories/{id}/restore             restore (POST)
///
/// /genres                              index, store
/// /genres/{id}                         show, update, destroy
/// /genres/{id}/restore                 restore (POST)
///
/// /cast_members                        index, store
/// /cast_members/{id}                   show, update, destroy
/// /cast_members/{id}/restore           restore (POST)
///
/// /videos                              index, store
/// /videos/{id}                         show, update, destroy
/// /videos/{id}/restore                 restore (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/genres", genre::router())
        .nest("/cast_members", cast_member::router())
        .nest("/videos", video::router())
}
