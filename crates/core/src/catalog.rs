//! Catalog vocabulary shared by the database and API layers.
//!
//! Holds the enumerated value sets (video ratings, cast member roles),
//! the field length limits enforced on input, and the entity names used
//! in not-found errors.

use serde::Serialize;

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

/// Maximum length for names and titles (matches `VARCHAR(255)` columns).
pub const MAX_NAME_LEN: usize = 255;

/* --------------------------------------------------------------------------
   Entity names
   -------------------------------------------------------------------------- */

pub const ENTITY_CATEGORY: &str = "Category";
pub const ENTITY_GENRE: &str = "Genre";
pub const ENTITY_CAST_MEMBER: &str = "CastMember";
pub const ENTITY_VIDEO: &str = "Video";

/* --------------------------------------------------------------------------
   Video rating
   -------------------------------------------------------------------------- */

/// Age rating of a video. Stored and serialized as its string code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    #[serde(rename = "L")]
    Free,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "12")]
    Twelve,
    #[serde(rename = "14")]
    Fourteen,
    #[serde(rename = "16")]
    Sixteen,
    #[serde(rename = "18")]
    Eighteen,
}

impl Rating {
    /// Every rating in display order.
    pub const ALL: [Rating; 6] = [
        Rating::Free,
        Rating::Ten,
        Rating::Twelve,
        Rating::Fourteen,
        Rating::Sixteen,
        Rating::Eighteen,
    ];

    /// The code persisted in `videos.rating`.
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Free => "L",
            Rating::Ten => "10",
            Rating::Twelve => "12",
            Rating::Fourteen => "14",
            Rating::Sixteen => "16",
            Rating::Eighteen => "18",
        }
    }

    /// Parse a rating code. Codes are matched exactly.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == code)
    }

    /// All codes, for error messages.
    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|r| r.as_str()).collect()
    }
}

/* --------------------------------------------------------------------------
   Cast member type
   -------------------------------------------------------------------------- */

/// Role of a cast member. Stored as `SMALLINT` in `cast_members.type`.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastMemberType {
    Director = 1,
    Actor = 2,
}

impl CastMemberType {
    pub const ALL: [CastMemberType; 2] = [CastMemberType::Director, CastMemberType::Actor];

    /// Return the database code.
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(CastMemberType::Director),
            2 => Some(CastMemberType::Actor),
            _ => None,
        }
    }

    pub fn codes() -> Vec<i16> {
        Self::ALL.iter().map(|t| t.code()).collect()
    }
}
