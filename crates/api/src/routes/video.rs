//! Route definitions for the `/videos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// Routes mounted at `/videos`.
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
        .route("/", get(video::index).post(video::store))
        .route(
            "/{id}",
            get(video::show)
                .put(video::update)
                .patch(video::update)
                .delete(video::destroy),
        )
        .route("/{id}/restore", post(video::restore))
}
