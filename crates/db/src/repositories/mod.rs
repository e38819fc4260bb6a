//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod cast_member_repo;
pub mod category_repo;
pub mod genre_repo;
pub mod pivot;
pub mod video_repo;

pub use cast_member_repo::CastMemberRepo;
pub use category_repo::CategoryRepo;
pub use genre_repo::GenreRepo;
pub use pivot::{PivotSync, RelationSync};
pub use video_repo::VideoRepo;
