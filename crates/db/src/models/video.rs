//! Video entity model and DTOs.

use catalog_core::catalog::Rating;
use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub year_launched: i16,
    pub opened: bool,
    /// One of the [`Rating`] codes.
    pub rating: String,
    /// Running time in minutes.
    pub duration: i32,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A video together with the ids of its categories and genres.
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: Video,
    pub categories_id: Vec<DbId>,
    pub genres_id: Vec<DbId>,
}

/// The full association sets a video write must leave behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoRelations {
    pub categories_id: Vec<DbId>,
    pub genres_id: Vec<DbId>,
}

/// Validated input for creating or updating a video.
#[derive(Debug, Clone)]
pub struct SaveVideo {
    pub title: String,
    pub description: String,
    pub year_launched: i16,
    /// Defaults to `false` on insert when omitted.
    pub opened: Option<bool>,
    pub rating: Rating,
    pub duration: i32,
    pub relations: VideoRelations,
}
