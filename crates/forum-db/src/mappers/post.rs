//! Post entity <-> model mapper

use forum_core::entities::Post;
use forum_core::value_objects::Snowflake;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            thread_id: Snowflake::new(model.thread_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            raw_content: model.raw_content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
