//! Repository for the `videos` table.
//!
//! Video writes are transactional: the row and its `category_video` /
//! `genre_video` associations commit together or not at all. The relation
//! step is delegated to a [`RelationSync`] so callers can substitute it.

use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::video::{SaveVideo, Video, VideoDetail};
use crate::models::ListScope;
use crate::repositories::pivot::{self, Pivot, RelationSync};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, year_launched, opened, rating, duration, \
    deleted_at, created_at, updated_at";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a video and sync its relations in one transaction.
    ///
    /// Any error from `sync` rolls back the insert and is returned as is.
    pub async fn create(
        pool: &PgPool,
        input: &SaveVideo,
        sync: &dyn RelationSync,
    ) -> Result<VideoDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO videos (title, description, year_launched, opened, rating, duration)
             VALUES ($1, $2, $3, COALESCE($4, false), $5, $6)
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.year_launched)
            .bind(input.opened)
            .bind(input.rating.as_str())
            .bind(input.duration)
            .fetch_one(&mut *tx)
            .await?;

        sync.sync_video(&mut tx, video.id, &input.relations).await?;
        let detail = Self::with_relations(&mut tx, video).await?;

        tx.commit().await?;
        Ok(detail)
    }

    /// Update a live video and replace its relations in one transaction.
    ///
    /// Returns `None` if no live row has the given `id`. Any error from
    /// `sync` rolls back the update and is returned as is.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveVideo,
        sync: &dyn RelationSync,
    ) -> Result<Option<VideoDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE videos SET
                title = $2,
                description = $3,
                year_launched = $4,
                opened = COALESCE($5, opened),
                rating = $6,
                duration = $7
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let Some(video) = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.year_launched)
            .bind(input.opened)
            .bind(input.rating.as_str())
            .bind(input.duration)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sync.sync_video(&mut tx, video.id, &input.relations).await?;
        let detail = Self::with_relations(&mut tx, video).await?;

        tx.commit().await?;
        Ok(Some(detail))
    }

    /// Find a video by ID. Soft-deleted rows only when `with_trashed`.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        with_trashed: bool,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = if with_trashed {
            format!("SELECT {COLUMNS} FROM videos WHERE id = $1")
        } else {
            format!("SELECT {COLUMNS} FROM videos WHERE id = $1 AND deleted_at IS NULL")
        };
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a video by ID together with its category and genre ids.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        with_trashed: bool,
    ) -> Result<Option<VideoDetail>, sqlx::Error> {
        let Some(video) = Self::find_by_id(pool, id, with_trashed).await? else {
            return Ok(None);
        };
        let mut conn = pool.acquire().await?;
        Self::with_relations(&mut conn, video).await.map(Some)
    }

    /// List videos, most recently created first.
    pub async fn list(pool: &PgPool, scope: &ListScope) -> Result<Vec<Video>, sqlx::Error> {
        let filter = if scope.with_trashed {
            ""
        } else {
            "WHERE deleted_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM videos {filter}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(scope.limit)
            .bind(scope.offset)
            .fetch_all(pool)
            .await
    }

    /// Soft-delete a video by ID. Returns `true` if a row was marked deleted.
    ///
    /// Pivot rows are kept so a restored video gets its relations back.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE videos SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted video, returning it with its relations.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<VideoDetail>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET deleted_at = NULL
             WHERE id = $1 AND deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        let mut conn = pool.acquire().await?;
        let Some(video) = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };
        Self::with_relations(&mut conn, video).await.map(Some)
    }

    /// Permanently delete a video. Its pivot rows go with it.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn with_relations(
        conn: &mut PgConnection,
        video: Video,
    ) -> Result<VideoDetail, sqlx::Error> {
        let categories_id = pivot::related_ids(&mut *conn, Pivot::CategoryVideo, video.id).await?;
        let genres_id = pivot::related_ids(&mut *conn, Pivot::GenreVideo, video.id).await?;
        Ok(VideoDetail {
            video,
            categories_id,
            genres_id,
        })
    }
}
