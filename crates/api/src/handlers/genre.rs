//! Handlers for the `/genres` resource.
//!
//! Show, store, update and restore respond with the genre's `categories_id`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::catalog::ENTITY_GENRE;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::genre::{Genre, GenreDetail};
use catalog_db::repositories::GenreRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::query::{ListParams, ShowParams};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_GENRE,
        id,
    })
}

/// GET /api/v1/genres
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Genre>>> {
    let genres = GenreRepo::list(&state.pool, &params.scope()).await?;
    Ok(Json(genres))
}

/// POST /api/v1/genres
pub async fn store(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<GenreDetail>)> {
    let Json(body) = body?;
    let input = forms::genre(&state.pool, &body).await?;
    let genre = GenreRepo::create(&state.pool, &input).await?;
    tracing::info!(
        genre_id = genre.genre.id,
        categories = genre.categories_id.len(),
        "Genre created",
    );
    Ok((StatusCode::CREATED, Json(genre)))
}

/// GET /api/v1/genres/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ShowParams>,
) -> AppResult<Json<GenreDetail>> {
    let genre = GenreRepo::find_detail(&state.pool, id, params.with_trashed)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(genre))
}

/// PUT /api/v1/genres/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<GenreDetail>> {
    let Json(body) = body?;
    GenreRepo::find_by_id(&state.pool, id, false)
        .await?
        .ok_or_else(|| not_found(id))?;
    let input = forms::genre(&state.pool, &body).await?;
    let genre = GenreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(genre_id = id, "Genre updated");
    Ok(Json(genre))
}

/// DELETE /api/v1/genres/{id}
pub async fn destroy(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if GenreRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(genre_id = id, "Genre deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/genres/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<GenreDetail>> {
    GenreRepo::restore(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let genre = GenreRepo::find_detail(&state.pool, id, false)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(genre_id = id, "Genre restored");
    Ok(Json(genre))
}
