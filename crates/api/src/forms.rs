//! Request payload readers.
//!
//! Each reader applies one resource's rule set to a JSON body and yields the
//! matching `Save*` input. Structural rules run first; `exists` checks on id
//! arrays then query the database and report into the same error set, so a
//! 422 response lists every failing field at once.
//!
//! The `exists` checks run before the write transaction opens. A referenced
//! row deleted in between is caught by the pivot foreign keys; the write
//! rolls back and the request answers 422 (see `classify_sqlx_error`).

use catalog_core::catalog::{CastMemberType, Rating, MAX_NAME_LEN};
use catalog_core::validation::{Payload, RULE_IN};
use catalog_db::models::cast_member::SaveCastMember;
use catalog_db::models::category::SaveCategory;
use catalog_db::models::genre::SaveGenre;
use catalog_db::models::video::{SaveVideo, VideoRelations};
use catalog_db::repositories::{CategoryRepo, GenreRepo};
use catalog_db::DbPool;
use serde_json::Value;

use crate::error::AppResult;

/// `name` required|max:255, `description` nullable|string, `is_active` boolean.
pub fn category(body: &Value) -> AppResult<SaveCategory> {
    let mut payload = Payload::new(body)?;
    let name = payload.required_string("name", Some(MAX_NAME_LEN));
    let description = payload.nullable_string("description", None);
    let is_active = payload.boolean("is_active");

    Ok(payload.finish(|| {
        Some(SaveCategory {
            name: name?,
            description,
            is_active,
        })
    })?)
}

/// `name` required|max:255, `is_active` boolean, `categories_id` array|exists.
pub async fn genre(pool: &DbPool, body: &Value) -> AppResult<SaveGenre> {
    let mut payload = Payload::new(body)?;
    let name = payload.required_string("name", Some(MAX_NAME_LEN));
    let is_active = payload.boolean("is_active");
    let categories_id = payload.id_array("categories_id", false);

    if let Some(ids) = &categories_id {
        let missing = CategoryRepo::missing_ids(pool, ids).await?;
        payload.reject_missing_ids("categories_id", &missing);
    }

    Ok(payload.finish(|| {
        Some(SaveGenre {
            name: name?,
            is_active,
            categories_id,
        })
    })?)
}

/// `name` required|max:255, `type` required|integer|in:1,2.
pub fn cast_member(body: &Value) -> AppResult<SaveCastMember> {
    let mut payload = Payload::new(body)?;
    let name = payload.required_string("name", Some(MAX_NAME_LEN));
    let member_type = payload.required_integer("type").and_then(|code| {
        let parsed = CastMemberType::from_code(code.into());
        if parsed.is_none() {
            payload.reject(
                "type",
                RULE_IN,
                "The selected type is invalid.".to_string(),
                Some(("values", serde_json::json!(CastMemberType::codes()))),
            );
        }
        parsed
    });

    Ok(payload.finish(|| {
        Some(SaveCastMember {
            name: name?,
            member_type: member_type?,
        })
    })?)
}

/// The video rule set; both id arrays are required and must name live rows.
pub async fn video(pool: &DbPool, body: &Value) -> AppResult<SaveVideo> {
    let mut payload = Payload::new(body)?;
    let title = payload.required_string("title", Some(MAX_NAME_LEN));
    let description = payload.required_string("description", None);
    let year_launched = payload.required_year("year_launched");
    let opened = payload.boolean("opened");
    let rating = payload.required_in("rating", &Rating::codes(), parse_rating);
    let duration = payload.required_integer("duration");
    let categories_id = payload.id_array("categories_id", true);
    let genres_id = payload.id_array("genres_id", true);

    if let Some(ids) = &categories_id {
        let missing = CategoryRepo::missing_ids(pool, ids).await?;
        payload.reject_missing_ids("categories_id", &missing);
    }
    if let Some(ids) = &genres_id {
        let missing = GenreRepo::missing_ids(pool, ids).await?;
        payload.reject_missing_ids("genres_id", &missing);
    }

    Ok(payload.finish(|| {
        Some(SaveVideo {
            title: title?,
            description: description?,
            year_launched: year_launched?,
            opened,
            rating: rating?,
            duration: duration?,
            relations: VideoRelations {
                categories_id: categories_id?,
                genres_id: genres_id?,
            },
        })
    })?)
}

/// Ratings arrive as strings, though numeric codes may come as JSON numbers.
fn parse_rating(value: &Value) -> Option<Rating> {
    match value {
        Value::String(s) => Rating::parse(s.trim()),
        Value::Number(n) => Rating::parse(&n.to_string()),
        _ => None,
    }
}
