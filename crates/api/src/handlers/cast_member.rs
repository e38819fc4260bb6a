//! Handlers for the `/cast_members` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::catalog::ENTITY_CAST_MEMBER;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::cast_member::CastMember;
use catalog_db::repositories::CastMemberRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::query::{ListParams, ShowParams};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_CAST_MEMBER,
        id,
    })
}

/// GET /api/v1/cast_members
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<CastMember>>> {
    let members = CastMemberRepo::list(&state.pool, &params.scope()).await?;
    Ok(Json(members))
}

/// POST /api/v1/cast_members
pub async fn store(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CastMember>)> {
    let Json(body) = body?;
    let input = forms::cast_member(&body)?;
    let member = CastMemberRepo::create(&state.pool, &input).await?;
    tracing::info!(cast_member_id = member.id, "Cast member created");
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/v1/cast_members/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ShowParams>,
) -> AppResult<Json<CastMember>> {
    let member = CastMemberRepo::find_by_id(&state.pool, id, params.with_trashed)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(member))
}

/// PUT /api/v1/cast_members/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<CastMember>> {
    let Json(body) = body?;
    CastMemberRepo::find_by_id(&state.pool, id, false)
        .await?
        .ok_or_else(|| not_found(id))?;
    let input = forms::cast_member(&body)?;
    let member = CastMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(cast_member_id = id, "Cast member updated");
    Ok(Json(member))
}

/// DELETE /api/v1/cast_members/{id}
pub async fn destroy(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CastMemberRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(cast_member_id = id, "Cast member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/cast_members/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CastMember>> {
    let member = CastMemberRepo::restore(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(cast_member_id = id, "Cast member restored");
    Ok(Json(member))
}
