//! Entity to response DTO conversions

use serde_json::Value as JsonValue;

use forum_core::entities::{Category, Post, SiteSetting, Thread, User, Warning};

use super::responses::{
    AuditActorResponse, CategoryResponse, CurrentUserResponse, PagedResponse, PostResponse,
    SettingResponse, ThreadDetailResponse, ThreadSummaryResponse, UserResponse, WarningResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            role: user.role.as_str().to_string(),
            is_banned: user.is_banned,
            is_muted: user.is_muted,
            warning_count: user.warning_count,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for AuditActorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

impl From<&Warning> for WarningResponse {
    fn from(warning: &Warning) -> Self {
        Self {
            id: warning.id.to_string(),
            reason: warning.reason.clone(),
            issued_by: warning.issued_by.to_string(),
            issued_at: warning.issued_at,
        }
    }
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            slug: category.slug.clone(),
            position: category.position,
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }
}

impl From<&SiteSetting> for SettingResponse {
    fn from(setting: &SiteSetting) -> Self {
        Self {
            key: setting.key.clone(),
            value: serde_json::to_value(&setting.value).unwrap_or(JsonValue::Null),
            scope: setting.scope.as_str().to_string(),
            updated_at: setting.updated_at,
        }
    }
}

impl ThreadSummaryResponse {
    /// Assemble from the thread row plus resolved author and reply count
    pub fn from_parts(thread: &Thread, author: Option<&User>, reply_count: i64) -> Self {
        Self {
            id: thread.id.to_string(),
            title: thread.title.clone(),
            author: author.map(UserResponse::from),
            category_id: thread.category_id.to_string(),
            is_pinned: thread.is_pinned,
            is_locked: thread.is_locked,
            views: thread.views,
            reply_count,
            last_post_at: thread.last_post_at,
            created_at: thread.created_at,
        }
    }
}

impl ThreadDetailResponse {
    /// Assemble from the thread row plus one resolved page of posts
    pub fn from_parts(
        thread: &Thread,
        author: Option<&User>,
        posts: PagedResponse<PostResponse>,
    ) -> Self {
        Self {
            id: thread.id.to_string(),
            title: thread.title.clone(),
            author: author.map(UserResponse::from),
            category_id: thread.category_id.to_string(),
            is_pinned: thread.is_pinned,
            is_locked: thread.is_locked,
            views: thread.views,
            created_at: thread.created_at,
            posts,
        }
    }
}

impl PostResponse {
    /// Assemble from the post row plus resolved author and like count
    pub fn from_parts(post: &Post, author: Option<&User>, like_count: i64) -> Self {
        Self {
            id: post.id.to_string(),
            thread_id: post.thread_id.to_string(),
            author: author.map(UserResponse::from),
            content: post.content.clone(),
            raw_content: post.raw_content.clone(),
            like_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::Snowflake;

    #[test]
    fn test_user_response_hides_email() {
        let user = User::new(
            Snowflake::new(42),
            "alice".to_string(),
            Some("alice@example.com".to_string()),
            "111".to_string(),
        );
        let public = UserResponse::from(&user);
        assert_eq!(public.id, "42");
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_setting_response_localized_value() {
        use forum_core::entities::{SettingScope, SettingValue, SiteSetting};
        use forum_core::value_objects::LocalizedText;

        let setting = SiteSetting::new(
            "site_name".to_string(),
            SettingValue::Localized(LocalizedText::new(
                "My Forum".to_string(),
                "Mein Forum".to_string(),
            )),
            SettingScope::Public,
        );
        let response = SettingResponse::from(&setting);
        assert_eq!(response.value["de"], "Mein Forum");
        assert_eq!(response.scope, "public");
    }
}
