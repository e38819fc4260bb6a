//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Save*` DTO carrying validated input for store and update

pub mod cast_member;
pub mod category;
pub mod genre;
pub mod video;

/// Row window and soft-delete visibility for list queries.
#[derive(Debug, Clone, Copy)]
pub struct ListScope {
    pub limit: i64,
    pub offset: i64,
    /// Include soft-deleted rows.
    pub with_trashed: bool,
}
