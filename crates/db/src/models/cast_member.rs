//! Cast member entity model and DTOs.

use catalog_core::catalog::CastMemberType;
use catalog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cast_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CastMember {
    pub id: DbId,
    pub name: String,
    /// See [`CastMemberType`] for the code values.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub member_type: i16,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating or updating a cast member.
#[derive(Debug, Clone)]
pub struct SaveCastMember {
    pub name: String,
    pub member_type: CastMemberType,
}
