//! Category entity - a named, ordered grouping of threads

use chrono::{DateTime, Utc};

use crate::value_objects::{LocalizedText, Snowflake};

/// Thread category with bilingual naming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Snowflake,
    pub name: LocalizedText,
    pub description: LocalizedText,
    /// URL-safe unique identifier
    pub slug: String,
    /// Display position, ascending
    pub position: i32,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new Category
    pub fn new(
        id: Snowflake,
        name: LocalizedText,
        description: LocalizedText,
        slug: String,
        position: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            slug,
            position,
            color: None,
            icon: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check a candidate slug: lowercase ascii alphanumerics and hyphens
    pub fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && slug.len() <= 64
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}
