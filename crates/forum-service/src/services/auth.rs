//! Authentication service
//!
//! Discord is the only identity provider: the OAuth handshake happens in a
//! collaborator and this service receives the verified identity. Accounts
//! are upserted by Discord id, banned users are rejected at login with the
//! ban reason, and sessions follow the access/refresh token pattern with
//! the refresh side stored in Redis.

use chrono::Utc;
use rand::Rng;
use tracing::{info, instrument, warn};
use validator::Validate;

use forum_cache::RefreshTokenData;
use forum_core::entities::User;
use forum_core::error::DomainError;

use crate::dto::{
    AuthResponse, CurrentUserResponse, DiscordLoginRequest, LogoutRequest, RefreshTokenRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Log in with a verified Discord identity
    ///
    /// First login creates the account; later logins refresh the profile
    /// fields from Discord. Users with a ban in effect are rejected with
    /// the reason and expiry in the message.
    #[instrument(skip(self, request), fields(discord_id = %request.discord_id))]
    pub async fn login_with_discord(
        &self,
        request: DiscordLoginRequest,
        device_info: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        request
            .validate()
            .map_err(|err| ServiceError::validation(err.to_string()))?;

        let user = match self
            .ctx
            .user_repo()
            .find_by_discord_id(&request.discord_id)
            .await?
        {
            Some(mut existing) => {
                if existing.ban_in_effect(Utc::now()) {
                    warn!(user_id = %existing.id, "login rejected: user banned");
                    return Err(ServiceError::not_authorized(ban_message(&existing)));
                }

                // Keep the profile in sync with Discord
                if existing.username != request.username
                    || existing.email != request.email
                    || existing.avatar != request.avatar
                {
                    existing.username = request.username;
                    existing.email = request.email;
                    existing.avatar = request.avatar;
                    existing.updated_at = Utc::now();
                    self.ctx.user_repo().update(&existing).await?;
                }
                existing
            }
            None => {
                let mut user = User::new(
                    self.ctx.generate_id(),
                    request.username,
                    request.email,
                    request.discord_id,
                );
                user.avatar = request.avatar;
                self.ctx.user_repo().create(&user).await?;
                info!(user_id = %user.id, "user created from Discord login");
                user
            }
        };

        self.issue_session(&user, device_info).await
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented token must be valid as a JWT and still known to the
    /// session store; rotation revokes it either way.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(|_| ServiceError::NotAuthenticated)?;
        let user_id = claims.user_id().map_err(|_| ServiceError::NotAuthenticated)?;

        let session = self
            .ctx
            .refresh_token_store()
            .validate(&request.refresh_token)
            .await
            .map_err(cache_err)?
            .ok_or(ServiceError::NotAuthenticated)?;

        if session.user_id != user_id {
            return Err(ServiceError::NotAuthenticated);
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotAuthenticated)?;
        if user.is_deleted() {
            return Err(ServiceError::NotAuthenticated);
        }
        if user.ban_in_effect(Utc::now()) {
            return Err(ServiceError::not_authorized(ban_message(&user)));
        }

        // Rotate: the presented token dies, a fresh pair is issued
        self.ctx
            .refresh_token_store()
            .revoke(&request.refresh_token)
            .await
            .map_err(cache_err)?;

        self.issue_session(&user, session.device_info).await
    }

    /// Log out: revoke the presented refresh token, or every session of the
    /// user when none is given
    #[instrument(skip(self, request))]
    pub async fn logout(
        &self,
        user_id: forum_core::Snowflake,
        request: LogoutRequest,
    ) -> ServiceResult<()> {
        match request.refresh_token {
            Some(token) => {
                self.ctx
                    .refresh_token_store()
                    .revoke(&token)
                    .await
                    .map_err(cache_err)?;
            }
            None => {
                self.ctx
                    .refresh_token_store()
                    .revoke_all_for_user(user_id)
                    .await
                    .map_err(cache_err)?;
            }
        }
        info!(user_id = %user_id, "logged out");
        Ok(())
    }

    /// Issue a token pair and register the refresh side in the session store
    async fn issue_session(
        &self,
        user: &User,
        device_info: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, user.role, &user.username)
            .map_err(|err| {
                ServiceError::Persistence(DomainError::InternalError(err.to_string()))
            })?;

        let mut session = RefreshTokenData::new(user.id, generate_session_id());
        if let Some(device) = device_info {
            session = session.with_device_info(device);
        }
        self.ctx
            .refresh_token_store()
            .store(&token_pair.refresh_token, &session)
            .await
            .map_err(cache_err)?;

        Ok(AuthResponse {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            token_type: token_pair.token_type,
            expires_in: token_pair.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}

fn cache_err(err: forum_cache::RedisPoolError) -> ServiceError {
    ServiceError::Persistence(DomainError::CacheError(err.to_string()))
}

/// Random session identifier for tracking one login among a user's sessions
fn generate_session_id() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const SESSION_ID_LENGTH: usize = 24;

    let mut rng = rand::thread_rng();
    (0..SESSION_ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Inline rejection message carrying the ban reason and expiry
fn ban_message(user: &User) -> String {
    let reason = user.ban_reason.as_deref().unwrap_or("No reason given");
    match user.banned_until {
        Some(until) => format!(
            "You are banned until {}: {reason}",
            until.format("%Y-%m-%d %H:%M UTC")
        ),
        None => format!("You are permanently banned: {reason}"),
    }
}
