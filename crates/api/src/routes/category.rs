//! Route definitions for the `/categories` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /                 -> index
/// POST   /                 -> store
/// GET    /{id}             -> show
/// PUT    /{id}             -> update
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> destroy
/// POST   /{id}/restore     -> restore
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::index).post(category::store))
        .route(
            "/{id}",
            get(category::show)
                .put(category::update)
                .patch(category::update)
                .delete(category::destroy),
        )
        .route("/{id}/restore", post(category::restore))
}
