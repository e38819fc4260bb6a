//! Repository for the `cast_members` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::cast_member::{CastMember, SaveCastMember};
use crate::models::ListScope;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, type, deleted_at, created_at, updated_at";

/// Provides CRUD operations for cast members.
pub struct CastMemberRepo;

impl CastMemberRepo {
    /// Insert a new cast member, returning the created row.
    pub async fn create(pool: &PgPool, input: &SaveCastMember) -> Result<CastMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO cast_members (name, type)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CastMember>(&query)
            .bind(&input.name)
            .bind(input.member_type.code())
            .fetch_one(pool)
            .await
    }

    /// Find a cast member by ID. Soft-deleted rows only when `with_trashed`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        with_trashed: bool,
    ) -> Result<Option<CastMember>, sqlx::Error> {
        let query = if with_trashed {
            format!("SELECT {COLUMNS} FROM cast_members WHERE id = $1")
        } else {
            format!("SELECT {COLUMNS} FROM cast_members WHERE id = $1 AND deleted_at IS NULL")
        };
        sqlx::query_as::<_, CastMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cast members, most recently created first.
    pub async fn list(pool: &PgPool, scope: &ListScope) -> Result<Vec<CastMember>, sqlx::Error> {
        let filter = if scope.with_trashed {
            ""
        } else {
            "WHERE deleted_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM cast_members {filter}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CastMember>(&query)
            .bind(scope.limit)
            .bind(scope.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a live cast member. Returns `None` if no live row has the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveCastMember,
    ) -> Result<Option<CastMember>, sqlx::Error> {
        let query = format!(
            "UPDATE cast_members SET name = $2, type = $3
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CastMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.member_type.code())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a cast member by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cast_members SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted cast member, returning it.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<CastMember>, sqlx::Error> {
        let query = format!(
            "UPDATE cast_members SET deleted_at = NULL
             WHERE id = $1 AND deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CastMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
