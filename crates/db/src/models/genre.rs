//! Genre entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A genre together with the ids of its categories.
#[derive(Debug, Clone, Serialize)]
pub struct GenreDetail {
    #[serde(flatten)]
    pub genre: Genre,
    pub categories_id: Vec<DbId>,
}

/// Validated input for creating or updating a genre.
#[derive(Debug, Clone)]
pub struct SaveGenre {
    pub name: String,
    /// Defaults to `true` on insert when omitted.
    pub is_active: Option<bool>,
    /// When `Some`, replaces the genre's category associations.
    pub categories_id: Option<Vec<DbId>>,
}
