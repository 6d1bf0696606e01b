//! Book entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub condition: Option<String>,
    pub status: BookStatus,
    pub owner_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Listing row for the public catalogue: the book plus its owner's
/// display data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookWithOwner {
    #[serde(flatten)]
    pub book: Book,
    pub owner: OwnerSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum BookStatus {
    #[serde(rename = "AVAILABLE")]
    #[sqlx(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "UNAVAILABLE")]
    #[sqlx(rename = "UNAVAILABLE")]
    Unavailable,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl From<&str> for BookStatus {
    fn from(s: &str) -> Self {
        match s {
            "UNAVAILABLE" => BookStatus::Unavailable,
            _ => BookStatus::Available,
        }
    }
}
