//! User entity <-> model mapper

use forum_core::entities::User;
use forum_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            discord_id: model.discord_id,
            avatar: model.avatar,
            // A corrupt role string degrades to the least-privileged role
            role: model.role.parse().unwrap_or_default(),
            is_banned: model.is_banned,
            ban_reason: model.ban_reason,
            banned_until: model.banned_until,
            is_muted: model.is_muted,
            muted_until: model.muted_until,
            warning_count: model.warning_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
