//! User entity - a forum account with its moderation status

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{Role, Snowflake};

/// Placeholder username for anonymized accounts
pub const ANONYMIZED_USERNAME: &str = "Deleted User";

/// Forum user account
///
/// Created on first Discord login. Never hard-deleted: self-requested account
/// deletion anonymizes the row so threads and posts keep valid author
/// references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: Option<String>,
    pub discord_id: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    /// None while banned means the ban is permanent
    pub banned_until: Option<DateTime<Utc>>,
    pub is_muted: bool,
    pub muted_until: Option<DateTime<Utc>>,
    pub warning_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new User from a Discord identity
    pub fn new(id: Snowflake, username: String, email: Option<String>, discord_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            discord_id: Some(discord_id),
            avatar: None,
            role: Role::User,
            is_banned: false,
            ban_reason: None,
            banned_until: None,
            is_muted: false,
            muted_until: None,
            warning_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Check whether a ban is currently in effect
    ///
    /// A timed ban whose expiry has passed no longer blocks the user even if
    /// the flag was not cleared yet.
    pub fn ban_in_effect(&self, now: DateTime<Utc>) -> bool {
        self.is_banned && self.banned_until.is_none_or(|until| until > now)
    }

    /// Check whether a mute is currently in effect
    pub fn mute_in_effect(&self, now: DateTime<Utc>) -> bool {
        self.is_muted && self.muted_until.is_none_or(|until| until > now)
    }

    /// Apply a ban; `duration_secs` of None means permanent
    pub fn ban(&mut self, reason: String, duration_secs: Option<i64>) {
        let now = Utc::now();
        self.is_banned = true;
        self.ban_reason = Some(reason);
        self.banned_until = duration_secs.map(|secs| now + Duration::seconds(secs));
        self.updated_at = now;
    }

    /// Lift a ban
    pub fn unban(&mut self) {
        self.is_banned = false;
        self.ban_reason = None;
        self.banned_until = None;
        self.updated_at = Utc::now();
    }

    /// Apply a mute; mutes are always time-bounded
    pub fn mute(&mut self, duration_secs: i64) {
        let now = Utc::now();
        self.is_muted = true;
        self.muted_until = Some(now + Duration::seconds(duration_secs));
        self.updated_at = now;
    }

    /// Lift a mute
    pub fn unmute(&mut self) {
        self.is_muted = false;
        self.muted_until = None;
        self.updated_at = Utc::now();
    }

    /// Change the role
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Anonymize the account in place for self-requested deletion
    ///
    /// The row survives so authored threads/posts keep a valid reference.
    pub fn anonymize(&mut self) {
        let now = Utc::now();
        self.username = ANONYMIZED_USERNAME.to_string();
        self.email = None;
        self.discord_id = None;
        self.avatar = None;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
