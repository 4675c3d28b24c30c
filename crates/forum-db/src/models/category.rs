//! Category database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for categories table
///
/// Bilingual name and description are stored as separate columns so the list
/// query stays index-friendly and plain.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: i64,
    pub name_en: String,
    pub name_de: String,
    pub description_en: String,
    pub description_de: String,
    pub slug: String,
    pub position: i32,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
