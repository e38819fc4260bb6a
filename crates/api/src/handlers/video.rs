//! Handlers for the `/videos` resource.
//!
//! Store and update write the video and its category/genre associations in
//! one transaction through the state's [`RelationSync`]; a failure there
//! rolls the write back and surfaces as a 500.
//!
//! [`RelationSync`]: catalog_db::repositories::RelationSync

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::catalog::ENTITY_VIDEO;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::video::{Video, VideoDetail};
use catalog_db::repositories::VideoRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::query::{ListParams, ShowParams};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_VIDEO,
        id,
    })
}

/// GET /api/v1/videos
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Video>>> {
    let videos = VideoRepo::list(&state.pool, &params.scope()).await?;
    Ok(Json(videos))
}

/// POST /api/v1/videos
pub async fn store(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<VideoDetail>)> {
    let Json(body) = body?;
    let input = forms::video(&state.pool, &body).await?;
    let video = VideoRepo::create(&state.pool, &input, state.relation_sync.as_ref())
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Video store rolled back"))?;
    tracing::info!(
        video_id = video.video.id,
        categories = video.categories_id.len(),
        genres = video.genres_id.len(),
        "Video created",
    );
    Ok((StatusCode::CREATED, Json(video)))
}

/// GET /api/v1/videos/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ShowParams>,
) -> AppResult<Json<VideoDetail>> {
    let video = VideoRepo::find_detail(&state.pool, id, params.with_trashed)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(video))
}

/// PUT /api/v1/videos/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<VideoDetail>> {
    let Json(body) = body?;
    VideoRepo::find_by_id(&state.pool, id, false)
        .await?
        .ok_or_else(|| not_found(id))?;
    let input = forms::video(&state.pool, &body).await?;
    let video = VideoRepo::update(&state.pool, id, &input, state.relation_sync.as_ref())
        .await
        .inspect_err(|e| tracing::warn!(video_id = id, error = %e, "Video update rolled back"))?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(video_id = id, "Video updated");
    Ok(Json(video))
}

/// DELETE /api/v1/videos/{id}
pub async fn destroy(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if VideoRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(video_id = id, "Video deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/videos/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VideoDetail>> {
    let video = VideoRepo::restore(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(video_id = id, "Video restored");
    Ok(Json(video))
}
