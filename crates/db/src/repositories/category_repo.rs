//! Repository for the `categories` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, SaveCategory};
use crate::models::ListScope;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, is_active, deleted_at, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &SaveCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, is_active)
             VALUES ($1, $2, COALESCE($3, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(input.description.clone().flatten())
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID. Soft-deleted rows only when `with_trashed`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        with_trashed: bool,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = if with_trashed {
            format!("SELECT {COLUMNS} FROM categories WHERE id = $1")
        } else {
            format!("SELECT {COLUMNS} FROM categories WHERE id = $1 AND deleted_at IS NULL")
        };
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories, most recently created first.
    pub async fn list(pool: &PgPool, scope: &ListScope) -> Result<Vec<Category>, sqlx::Error> {
        let filter = if scope.with_trashed {
            ""
        } else {
            "WHERE deleted_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM categories {filter}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(scope.limit)
            .bind(scope.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a live category.
    ///
    /// `name` is always written; `description` and `is_active` only when
    /// present in `input`. Returns `None` if no live row has the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                description = CASE WHEN $3 THEN $4 ELSE description END,
                is_active = COALESCE($5, is_active)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a category by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted category, returning it. `None` if the row is
    /// missing or not deleted.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET deleted_at = NULL
             WHERE id = $1 AND deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a category. Its pivot rows go with it.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids from `ids` that do not name a live category, ascending.
    pub async fn missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>(
            "SELECT t.id FROM UNNEST($1::BIGINT[]) AS t(id)
             WHERE NOT EXISTS (
                 SELECT 1 FROM categories c WHERE c.id = t.id AND c.deleted_at IS NULL
             )
             ORDER BY t.id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
