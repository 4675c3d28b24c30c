//! Post entity - a single message within a thread

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum post length in markdown characters
pub const MAX_POST_LENGTH: usize = 20_000;

/// A message within a thread
///
/// `content` is the sanitized HTML rendering; `raw_content` is the markdown
/// the author submitted, kept for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub thread_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub raw_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post
    pub fn new(
        id: Snowflake,
        thread_id: Snowflake,
        author_id: Snowflake,
        content: String,
        raw_content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            thread_id,
            author_id,
            content,
            raw_content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content after an edit
    pub fn set_content(&mut self, content: String, raw_content: String) {
        self.content = content;
        self.raw_content = raw_content;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_updates_both_renderings() {
        let mut post = Post::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "<p>hi</p>".to_string(),
            "hi".to_string(),
        );
        post.set_content("<p>hello</p>".to_string(), "hello".to_string());
        assert_eq!(post.content, "<p>hello</p>");
        assert_eq!(post.raw_content, "hello");
    }
}
