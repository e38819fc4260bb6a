//! Shared query parameter types for API handlers.

use catalog_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use catalog_db::models::ListScope;
use serde::Deserialize;

/// Index parameters (`?limit=&offset=&with_trashed=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Include soft-deleted rows.
    #[serde(default)]
    pub with_trashed: bool,
}

impl ListParams {
    /// Clamp the raw parameters into a query window.
    pub fn scope(&self) -> ListScope {
        ListScope {
            limit: clamp_limit(self.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
            offset: clamp_offset(self.offset),
            with_trashed: self.with_trashed,
        }
    }
}

/// Show parameters (`?with_trashed=`).
#[derive(Debug, Default, Deserialize)]
pub struct ShowParams {
    #[serde(default)]
    pub with_trashed: bool,
}
