//! Category entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or updating a category.
#[derive(Debug, Clone)]
pub struct SaveCategory {
    pub name: String,
    /// `None` leaves the stored value alone (null on insert);
    /// `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Defaults to `true` on insert when omitted.
    pub is_active: Option<bool>,
}
