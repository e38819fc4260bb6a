use std::sync::Arc;

use catalog_db::repositories::RelationSync;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Relation step of video store/update. Production uses `PivotSync`.
    pub relation_sync: Arc<dyn RelationSync>,
}
