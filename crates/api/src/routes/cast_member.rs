//! Route definitions for the `/cast_members` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cast_member;
use crate::state::AppState;

/// Routes mounted at `/cast_members`.
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
        .route("/", get(cast_member::index).post(cast_member::store))
        .route(
            "/{id}",
            get(cast_member::show)
                .put(cast_member::update)
                .patch(cast_member::update)
                .delete(cast_member::destroy),
        )
        .route("/{id}/restore", post(cast_member::restore))
}
