//! Thread entity <-> model mapper

use forum_core::entities::Thread;
use forum_core::value_objects::Snowflake;

use crate::models::ThreadModel;

impl From<ThreadModel> for Thread {
    fn from(model: ThreadModel) -> Self {
        Thread {
            id: Snowflake::new(model.id),
            title: model.title,
            author_id: Snowflake::new(model.author_id),
            category_id: Snowflake::new(model.category_id),
            is_pinned: model.is_pinned,
            is_locked: model.is_locked,
            views: model.views,
            last_post_at: model.last_post_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
