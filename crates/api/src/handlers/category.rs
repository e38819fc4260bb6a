//! Handlers for the `/categories` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::catalog::ENTITY_CATEGORY;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::category::Category;
use catalog_db::repositories::CategoryRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::query::{ListParams, ShowParams};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_CATEGORY,
        id,
    })
}

/// GET /api/v1/categories
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool, &params.scope()).await?;
    Ok(Json(categories))
}

/// POST /api/v1/categories
pub async fn store(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let Json(body) = body?;
    let input = forms::category(&body)?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ShowParams>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id, params.with_trashed)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Category>> {
    let Json(body) = body?;
    CategoryRepo::find_by_id(&state.pool, id, false)
        .await?
        .ok_or_else(|| not_found(id))?;
    let input = forms::category(&body)?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(category_id = id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
pub async fn destroy(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CategoryRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/categories/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::restore(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(category_id = id, "Category restored");
    Ok(Json(category))
}
