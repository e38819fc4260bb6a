//! Route definitions for the `/genres` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::genre;
use crate::state::AppState;

/// Routes mounted at `/genres`.
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
        .route("/", get(genre::index).post(genre::store))
        .route(
            "/{id}",
            get(genre::show)
                .put(genre::update)
                .patch(genre::update)
                .delete(genre::destroy),
        )
        .route("/{id}/restore", post(genre::restore))
}
