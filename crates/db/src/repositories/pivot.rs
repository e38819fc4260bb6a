//! Pivot tables and relation synchronisation.
//!
//! A pivot row records only that two rows are associated. Writes always
//! replace the owner's full set: existing rows are deleted and the requested
//! ids inserted, so the table ends up holding exactly that set.

use async_trait::async_trait;
use catalog_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::video::VideoRelations;

/// The many-to-many association tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    /// Video owns category ids.
    CategoryVideo,
    /// Video owns genre ids.
    GenreVideo,
    /// Genre owns category ids.
    CategoryGenre,
}

impl Pivot {
    pub fn table(self) -> &'static str {
        match self {
            Pivot::CategoryVideo => "category_video",
            Pivot::GenreVideo => "genre_video",
            Pivot::CategoryGenre => "category_genre",
        }
    }

    /// Column referencing the owning side.
    pub fn owner_column(self) -> &'static str {
        match self {
            Pivot::CategoryVideo | Pivot::GenreVideo => "video_id",
            Pivot::CategoryGenre => "genre_id",
        }
    }

    /// Column referencing the associated side.
    pub fn related_column(self) -> &'static str {
        match self {
            Pivot::CategoryVideo | Pivot::CategoryGenre => "category_id",
            Pivot::GenreVideo => "genre_id",
        }
    }
}

/// Replace every association of `owner_id` in `pivot` with `related_ids`.
///
/// Must run on a connection inside the caller's transaction.
pub async fn replace(
    conn: &mut PgConnection,
    pivot: Pivot,
    owner_id: DbId,
    related_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    let delete = format!(
        "DELETE FROM {} WHERE {} = $1",
        pivot.table(),
        pivot.owner_column()
    );
    sqlx::query(&delete).bind(owner_id).execute(&mut *conn).await?;

    if related_ids.is_empty() {
        return Ok(());
    }

    let insert = format!(
        "INSERT INTO {table} ({owner}, {related}) \
         SELECT $1, UNNEST($2::BIGINT[]) \
         ON CONFLICT DO NOTHING",
        table = pivot.table(),
        owner = pivot.owner_column(),
        related = pivot.related_column(),
    );
    sqlx::query(&insert)
        .bind(owner_id)
        .bind(related_ids)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Ids associated with `owner_id`, ascending. Includes soft-deleted rows.
pub async fn related_ids<'e, E>(
    executor: E,
    pivot: Pivot,
    owner_id: DbId,
) -> Result<Vec<DbId>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "SELECT {related} FROM {table} WHERE {owner} = $1 ORDER BY {related}",
        table = pivot.table(),
        owner = pivot.owner_column(),
        related = pivot.related_column(),
    );
    sqlx::query_scalar::<_, DbId>(&query)
        .bind(owner_id)
        .fetch_all(executor)
        .await
}

/// The relation-handling step of a video write.
///
/// Called inside the write's transaction after the video row is saved. An
/// error aborts the transaction, so the row write is rolled back as well.
#[async_trait]
pub trait RelationSync: Send + Sync {
    async fn sync_video(
        &self,
        conn: &mut PgConnection,
        video_id: DbId,
        relations: &VideoRelations,
    ) -> Result<(), sqlx::Error>;
}

/// Replace-syncs `category_video` and `genre_video`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotSync;

#[async_trait]
impl RelationSync for PivotSync {
    async fn sync_video(
        &self,
        conn: &mut PgConnection,
        video_id: DbId,
        relations: &VideoRelations,
    ) -> Result<(), sqlx::Error> {
        replace(conn, Pivot::CategoryVideo, video_id, &relations.categories_id).await?;
        replace(conn, Pivot::GenreVideo, video_id, &relations.genres_id).await?;
        tracing::debug!(
            video_id,
            categories = relations.categories_id.len(),
            genres = relations.genres_id.len(),
            "Video relations synced",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_columns() {
        assert_eq!(Pivot::CategoryVideo.table(), "category_video");
        assert_eq!(Pivot::CategoryVideo.owner_column(), "video_id");
        assert_eq!(Pivot::CategoryVideo.related_column(), "category_id");
        assert_eq!(Pivot::GenreVideo.related_column(), "genre_id");
        assert_eq!(Pivot::CategoryGenre.owner_column(), "genre_id");
        assert_eq!(Pivot::CategoryGenre.related_column(), "category_id");
    }
}
