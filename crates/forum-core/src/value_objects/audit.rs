//! Audit log value objects
//!
//! `AuditAction` is the closed set of loggable moderation actions and
//! `EntityRef` is the tagged reference to the entity an action touched.
//! Keeping the reference a sum type makes rendering exhaustive: adding a new
//! entity kind forces every match site to handle it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Snowflake;

/// Closed set of audited moderation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ThreadPinned,
    ThreadUnpinned,
    ThreadLocked,
    ThreadUnlocked,
    ThreadDeleted,
    PostDeleted,
    UserBanned,
    UserUnbanned,
    UserMuted,
    UserUnmuted,
    UserWarned,
    RoleChanged,
    CategoryCreated,
    CategoryUpdated,
    CategoryDeleted,
    CategoriesReordered,
    SettingUpdated,
    SettingDeleted,
}

impl AuditAction {
    /// Database/string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreadPinned => "thread_pinned",
            Self::ThreadUnpinned => "thread_unpinned",
            Self::ThreadLocked => "thread_locked",
            Self::ThreadUnlocked => "thread_unlocked",
            Self::ThreadDeleted => "thread_deleted",
            Self::PostDeleted => "post_deleted",
            Self::UserBanned => "user_banned",
            Self::UserUnbanned => "user_unbanned",
            Self::UserMuted => "user_muted",
            Self::UserUnmuted => "user_unmuted",
            Self::UserWarned => "user_warned",
            Self::RoleChanged => "role_changed",
            Self::CategoryCreated => "category_created",
            Self::CategoryUpdated => "category_updated",
            Self::CategoryDeleted => "category_deleted",
            Self::CategoriesReordered => "categories_reordered",
            Self::SettingUpdated => "setting_updated",
            Self::SettingDeleted => "setting_deleted",
        }
    }

    /// Parse from the database representation
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "thread_pinned" => Self::ThreadPinned,
            "thread_unpinned" => Self::ThreadUnpinned,
            "thread_locked" => Self::ThreadLocked,
            "thread_unlocked" => Self::ThreadUnlocked,
            "thread_deleted" => Self::ThreadDeleted,
            "post_deleted" => Self::PostDeleted,
            "user_banned" => Self::UserBanned,
            "user_unbanned" => Self::UserUnbanned,
            "user_muted" => Self::UserMuted,
            "user_unmuted" => Self::UserUnmuted,
            "user_warned" => Self::UserWarned,
            "role_changed" => Self::RoleChanged,
            "category_created" => Self::CategoryCreated,
            "category_updated" => Self::CategoryUpdated,
            "category_deleted" => Self::CategoryDeleted,
            "categories_reordered" => Self::CategoriesReordered,
            "setting_updated" => Self::SettingUpdated,
            "setting_deleted" => Self::SettingDeleted,
            _ => return None,
        })
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged reference to the entity an audit entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "entity_type", content = "entity_id", rename_all = "lowercase")]
pub enum EntityRef {
    User(Snowflake),
    Thread(Snowflake),
    Post(Snowflake),
    Category(Snowflake),
}

impl EntityRef {
    /// The discriminator stored in the database
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Thread(_) => "thread",
            Self::Post(_) => "post",
            Self::Category(_) => "category",
        }
    }

    /// The referenced entity's id
    pub fn id(&self) -> Snowflake {
        match self {
            Self::User(id) | Self::Thread(id) | Self::Post(id) | Self::Category(id) => *id,
        }
    }

    /// Reassemble from the stored discriminator + id pair
    pub fn from_parts(kind: &str, id: Snowflake) -> Option<Self> {
        Some(match kind {
            "user" => Self::User(id),
            "thread" => Self::Thread(id),
            "post" => Self::Post(id),
            "category" => Self::Category(id),
            _ => return None,
        })
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}
