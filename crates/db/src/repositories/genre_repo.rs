//! Repository for the `genres` table and its `category_genre` associations.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::{Genre, GenreDetail, SaveGenre};
use crate::models::ListScope;
use crate::repositories::pivot::{self, Pivot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, is_active, deleted_at, created_at, updated_at";

/// Provides CRUD operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// Insert a new genre and its category associations in one transaction.
    pub async fn create(pool: &PgPool, input: &SaveGenre) -> Result<GenreDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO genres (name, is_active)
             VALUES ($1, COALESCE($2, true))
             RETURNING {COLUMNS}"
        );
        let genre = sqlx::query_as::<_, Genre>(&query)
            .bind(&input.name)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(categories_id) = &input.categories_id {
            pivot::replace(&mut tx, Pivot::CategoryGenre, genre.id, categories_id).await?;
        }
        let categories_id = pivot::related_ids(&mut *tx, Pivot::CategoryGenre, genre.id).await?;

        tx.commit().await?;
        Ok(GenreDetail {
            genre,
            categories_id,
        })
    }

    /// Find a genre by ID. Soft-deleted rows only when `with_trashed`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        with_trashed: bool,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = if with_trashed {
            format!("SELECT {COLUMNS} FROM genres WHERE id = $1")
        } else {
            format!("SELECT {COLUMNS} FROM genres WHERE id = $1 AND deleted_at IS NULL")
        };
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a genre by ID together with its category ids.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        with_trashed: bool,
    ) -> Result<Option<GenreDetail>, sqlx::Error> {
        let Some(genre) = Self::find_by_id(pool, id, with_trashed).await? else {
            return Ok(None);
        };
        let categories_id = pivot::related_ids(pool, Pivot::CategoryGenre, genre.id).await?;
        Ok(Some(GenreDetail {
            genre,
            categories_id,
        }))
    }

    /// List genres, most recently created first.
    pub async fn list(pool: &PgPool, scope: &ListScope) -> Result<Vec<Genre>, sqlx::Error> {
        let filter = if scope.with_trashed {
            ""
        } else {
            "WHERE deleted_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM genres {filter}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(scope.limit)
            .bind(scope.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a live genre, replacing its categories when `categories_id` is
    /// given. Returns `None` if no live row has the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveGenre,
    ) -> Result<Option<GenreDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE genres SET
                name = $2,
                is_active = COALESCE($3, is_active)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let Some(genre) = sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(categories_id) = &input.categories_id {
            pivot::replace(&mut tx, Pivot::CategoryGenre, genre.id, categories_id).await?;
        }
        let categories_id = pivot::related_ids(&mut *tx, Pivot::CategoryGenre, genre.id).await?;

        tx.commit().await?;
        Ok(Some(GenreDetail {
            genre,
            categories_id,
        }))
    }

    /// Soft-delete a genre by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE genres SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted genre, returning it. `None` if the row is
    /// missing or not deleted.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!(
            "UPDATE genres SET deleted_at = NULL
             WHERE id = $1 AND deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a genre. Its pivot rows go with it.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids from `ids` that do not name a live genre, ascending.
    pub async fn missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>(
            "SELECT t.id FROM UNNEST($1::BIGINT[]) AS t(id)
             WHERE NOT EXISTS (
                 SELECT 1 FROM genres g WHERE g.id = t.id AND g.deleted_at IS NULL
             )
             ORDER BY t.id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
