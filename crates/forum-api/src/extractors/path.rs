//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use forum_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with user_id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}

/// Path parameters with thread_id
#[derive(Debug, serde::Deserialize)]
pub struct ThreadIdPath {
    pub thread_id: String,
}

impl ThreadIdPath {
    /// Parse thread_id as Snowflake
    pub fn thread_id(&self) -> Result<Snowflake, ApiError> {
        self.thread_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid thread_id format"))
    }
}

/// Path parameters with post_id
#[derive(Debug, serde::Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    /// Parse post_id as Snowflake
    pub fn post_id(&self) -> Result<Snowflake, ApiError> {
        self.post_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid post_id format"))
    }
}

/// Path parameters with category_id
#[derive(Debug, serde::Deserialize)]
pub struct CategoryIdPath {
    pub category_id: String,
}

impl CategoryIdPath {
    /// Parse category_id as Snowflake
    pub fn category_id(&self) -> Result<Snowflake, ApiError> {
        self.category_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid category_id format"))
    }
}

/// Path parameters for category slug lookup
#[derive(Debug, serde::Deserialize)]
pub struct SlugPath {
    pub slug: String,
}

impl SlugPath {
    /// Get the slug
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// Path parameters for setting key lookup
#[derive(Debug, serde::Deserialize)]
pub struct SettingKeyPath {
    pub key: String,
}

impl SettingKeyPath {
    /// Get the setting key
    pub fn key(&self) -> &str {
        &self.key
    }
}
