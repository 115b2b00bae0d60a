use std::fmt;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::cache::{DefaultGuildCache, GuildCache};
use crate::error::{ClientError, ValidationError};
use crate::model::cdn::{cdn_url, ImageFormat, INVITE_URL};
use crate::model::patch::to_body;
use crate::model::user::ANIMATED_PREFIX;
use crate::model::{
    channel_factory, ChannelPayload, CreateChannel, CreateRole, GuildChannel, GuildMember,
    GuildRef, MemberPayload, Model, Role, RolePayload, Snowflake,
};
use crate::rest::Rest;

/// Largest `limit` [`Guild::search_members`] accepts.
pub const MAX_MEMBER_SEARCH_LIMIT: u32 = 1000;

fn default_locale() -> String {
    "en-US".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildPayload {
    pub id: Snowflake,
    pub name: String,
    pub icon: Option<String>,
    /// Sent instead of `icon` in some guild templates.
    pub icon_hash: Option<String>,
    pub splash: Option<String>,
    pub discovery_splash: Option<String>,
    pub banner: Option<String>,
    pub owner_id: Option<Snowflake>,
    pub description: Option<String>,
    #[serde(default)]
    pub afk_timeout: u32,
    #[serde(default)]
    pub premium_subscription_count: u32,
    #[serde(default = "default_locale")]
    pub preferred_locale: String,
    #[serde(default)]
    pub widget_enabled: bool,
    #[serde(default)]
    pub premium_progress_bar_enabled: bool,
    #[serde(default)]
    pub system_channel_flags: u64,
    #[serde(default)]
    pub verification_level: u8,
    #[serde(default)]
    pub default_message_notifications: u8,
    #[serde(default)]
    pub explicit_content_filter: u8,
    #[serde(default)]
    pub mfa_level: u8,
    #[serde(default)]
    pub premium_tier: u8,
    #[serde(default)]
    pub nsfw_level: u8,
    pub max_presences: Option<u64>,
    pub max_members: Option<u64>,
    pub max_video_channel_users: Option<u64>,
    pub approximate_member_count: Option<u64>,
    pub approximate_presence_count: Option<u64>,
    pub vanity_url_code: Option<String>,
    pub afk_channel_id: Option<Snowflake>,
    pub widget_channel_id: Option<Snowflake>,
    pub application_id: Option<Snowflake>,
    pub system_channel_id: Option<Snowflake>,
    pub rules_channel_id: Option<Snowflake>,
    pub public_updates_channel_id: Option<Snowflake>,
    #[serde(default)]
    pub features: Vec<String>,
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub large: bool,
    pub member_count: Option<u64>,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default)]
    pub roles: Vec<RolePayload>,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
    #[serde(default)]
    pub channels: Vec<ChannelPayload>,
}

pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub icon: Option<String>,
    pub splash: Option<String>,
    pub discovery_splash: Option<String>,
    pub banner: Option<String>,
    pub owner_id: Option<Snowflake>,
    pub description: Option<String>,
    /// Seconds before idle members are moved to the AFK channel. `0` is never.
    pub afk_timeout: u32,
    /// Number of boosts.
    pub premium_subscription_count: u32,
    pub preferred_locale: String,
    pub widget_enabled: bool,
    pub premium_progress_bar_enabled: bool,
    /// Raw system channel flag bits.
    pub system_channel_flags: u64,
    pub verification_level: u8,
    /// Sent as `default_message_notifications`.
    pub notification_level: u8,
    pub explicit_content_filter: u8,
    pub mfa_level: u8,
    /// Boost level.
    pub premium_tier: u8,
    pub nsfw_level: u8,
    pub max_presences: Option<u64>,
    pub max_members: Option<u64>,
    pub max_video_channel_users: Option<u64>,
    pub approximate_member_count: Option<u64>,
    pub approximate_presence_count: Option<u64>,
    /// See [`vanity_invite_url`](Guild::vanity_invite_url).
    pub vanity_invite_code: Option<String>,
    pub afk_channel_id: Option<Snowflake>,
    pub widget_channel_id: Option<Snowflake>,
    /// Set when an application created the guild.
    pub application_id: Option<Snowflake>,
    pub system_channel_id: Option<Snowflake>,
    pub rules_channel_id: Option<Snowflake>,
    pub public_updates_channel_id: Option<Snowflake>,
    pub features: Vec<String>,
    /// When the bot joined. Only sent when the guild is first received, as
    /// are `large`, `member_count` and `unavailable`.
    pub joined_at: Option<DateTime<Utc>>,
    pub large: bool,
    pub member_count: Option<u64>,
    /// The guild is out due to an outage.
    pub unavailable: bool,
    rest: Arc<dyn Rest>,
    cache: Arc<dyn GuildCache>,
}

impl Guild {
    /// Builds a guild with an in-memory cache.
    pub fn new(data: Value, rest: Arc<dyn Rest>) -> Result<Self, ClientError> {
        Self::with_cache(data, rest, Arc::new(DefaultGuildCache::new()))
    }

    pub fn with_cache(
        data: Value,
        rest: Arc<dyn Rest>,
        cache: Arc<dyn GuildCache>,
    ) -> Result<Self, ClientError> {
        let payload: GuildPayload = serde_json::from_value(data)?;
        Ok(Self::from_payload(payload, rest, cache))
    }

    /// Fills `cache` with the payload's roles, then members, then channels.
    /// Roles go first so members can resolve theirs.
    pub fn from_payload(mut payload: GuildPayload, rest: Arc<dyn Rest>, cache: Arc<dyn GuildCache>) -> Self {
        cache.clear();
        let mut guild = Self {
            id: payload.id,
            name: String::new(),
            icon: None,
            splash: None,
            discovery_splash: None,
            banner: None,
            owner_id: None,
            description: None,
            afk_timeout: 0,
            premium_subscription_count: 0,
            preferred_locale: default_locale(),
            widget_enabled: false,
            premium_progress_bar_enabled: false,
            system_channel_flags: 0,
            verification_level: 0,
            notification_level: 0,
            explicit_content_filter: 0,
            mfa_level: 0,
            premium_tier: 0,
            nsfw_level: 0,
            max_presences: None,
            max_members: None,
            max_video_channel_users: None,
            approximate_member_count: None,
            approximate_presence_count: None,
            vanity_invite_code: None,
            afk_channel_id: None,
            widget_channel_id: None,
            application_id: None,
            system_channel_id: None,
            rules_channel_id: None,
            public_updates_channel_id: None,
            features: Vec::new(),
            joined_at: payload.joined_at,
            large: payload.large,
            member_count: payload.member_count,
            unavailable: payload.unavailable,
            rest,
            cache,
        };

        let handle = guild.handle();
        let roles = std::mem::take(&mut payload.roles);
        let members = std::mem::take(&mut payload.members);
        let channels = std::mem::take(&mut payload.channels);
        log::debug!(
            "caching guild {}: {} roles, {} members, {} channels",
            guild.id,
            roles.len(),
            members.len(),
            channels.len()
        );
        for role in roles {
            guild.cache.add_role(Role::from_payload(role, guild.id));
        }
        for member in members {
            guild.cache.add_member(GuildMember::from_payload(member, handle.clone()));
        }
        for channel in channels {
            let construct = channel_factory(channel.kind);
            guild.cache.add_channel(construct(channel, handle.clone()));
        }

        guild.apply(payload);
        guild
    }

    /// A handle for entities that belong to this guild.
    pub fn handle(&self) -> GuildRef {
        GuildRef::new(self.id, self.rest.clone(), &self.cache)
    }

    pub fn cache(&self) -> &Arc<dyn GuildCache> {
        &self.cache
    }

    pub fn rest(&self) -> &Arc<dyn Rest> {
        &self.rest
    }

    /// The `@everyone` role, if cached.
    pub fn default_role(&self) -> Option<Role> {
        self.cache.get_role(self.id)
    }

    pub fn vanity_invite_url(&self) -> Option<String> {
        self.vanity_invite_code
            .as_ref()
            .map(|code| format!("{}/{}", INVITE_URL, code))
    }

    pub fn is_icon_animated(&self) -> bool {
        self.icon
            .as_deref()
            .is_some_and(|icon| icon.starts_with(ANIMATED_PREFIX))
    }

    /// `None` without an icon. The format defaults to GIF for animated
    /// icons and PNG otherwise.
    pub fn icon_url(
        &self,
        format: Option<ImageFormat>,
        size: Option<u32>,
    ) -> Result<Option<String>, ValidationError> {
        let Some(icon) = &self.icon else {
            return Ok(None);
        };
        let format = format.unwrap_or(if self.is_icon_animated() {
            ImageFormat::Gif
        } else {
            ImageFormat::Png
        });
        cdn_url(&format!("/icons/{}/{}", self.id, icon), format, size, true).map(Some)
    }

    /// Banners, splashes and discovery splashes are static: GIF is rejected.
    pub fn banner_url(
        &self,
        format: Option<ImageFormat>,
        size: Option<u32>,
    ) -> Result<Option<String>, ValidationError> {
        self.static_asset_url("banners", self.banner.as_deref(), format, size)
    }

    pub fn splash_url(
        &self,
        format: Option<ImageFormat>,
        size: Option<u32>,
    ) -> Result<Option<String>, ValidationError> {
        self.static_asset_url("splashes", self.splash.as_deref(), format, size)
    }

    pub fn discovery_splash_url(
        &self,
        format: Option<ImageFormat>,
        size: Option<u32>,
    ) -> Result<Option<String>, ValidationError> {
        self.static_asset_url("discovery-splashes", self.discovery_splash.as_deref(), format, size)
    }

    fn static_asset_url(
        &self,
        kind: &str,
        hash: Option<&str>,
        format: Option<ImageFormat>,
        size: Option<u32>,
    ) -> Result<Option<String>, ValidationError> {
        let Some(hash) = hash else {
            return Ok(None);
        };
        let path = format!("/{}/{}/{}", kind, self.id, hash);
        cdn_url(&path, format.unwrap_or(ImageFormat::Png), size, false).map(Some)
    }

    pub fn channel_from_payload(&self, data: Value) -> Result<GuildChannel, ClientError> {
        GuildChannel::from_payload(data, self.handle())
    }

    pub fn member_from_payload(&self, data: Value) -> Result<GuildMember, ClientError> {
        let payload: MemberPayload = serde_json::from_value(data)?;
        Ok(GuildMember::from_payload(payload, self.handle()))
    }

    fn role_from_payload(&self, data: Value) -> Result<Role, ClientError> {
        let payload: RolePayload = serde_json::from_value(data)?;
        Ok(Role::from_payload(payload, self.id))
    }

    /// Leaves the guild. Nothing is dropped from any cache.
    pub async fn leave(&self) -> Result<(), ClientError> {
        log::debug!("leaving guild {}", self.id);
        self.rest.leave_guild(self.id).await
    }

    /// Fetches every role. The guild cache is left as it is.
    pub async fn fetch_roles(&self) -> Result<Vec<Role>, ClientError> {
        let data = self.rest.get_guild_roles(self.id).await?;
        data.into_iter().map(|role| self.role_from_payload(role)).collect()
    }

    /// Creates a role. Needs `manage_roles`.
    pub async fn create_role(&self, create: CreateRole) -> Result<Role, ClientError> {
        let body = to_body(&create)?;
        log::debug!("creating role in guild {} ({:?})", self.id, body.keys().collect::<Vec<_>>());
        let data = self.rest.create_role(self.id, body, create.reason.as_deref()).await?;
        self.role_from_payload(data)
    }

    pub async fn fetch_member(&self, user_id: Snowflake) -> Result<GuildMember, ClientError> {
        let data = self.rest.get_guild_member(self.id, user_id).await?;
        self.member_from_payload(data)
    }

    /// Members whose username or nickname starts with `query`, at most
    /// `limit` of them (1 to 1000).
    pub async fn search_members(&self, query: &str, limit: u32) -> Result<Vec<GuildMember>, ClientError> {
        if !(1..=MAX_MEMBER_SEARCH_LIMIT).contains(&limit) {
            return Err(ValidationError::SearchLimitOutOfRange(limit).into());
        }
        let data = self.rest.search_guild_members(self.id, query, limit).await?;
        data.into_iter().map(|member| self.member_from_payload(member)).collect()
    }

    /// Fetches every channel, each built as the kind its `type` says.
    /// The guild cache is left as it is.
    pub async fn fetch_channels(&self) -> Result<Vec<GuildChannel>, ClientError> {
        let data = self.rest.get_guild_channels(self.id).await?;
        data.into_iter().map(|channel| self.channel_from_payload(channel)).collect()
    }

    /// Creates a channel. Needs `manage_channels`.
    ///
    /// The new channel isn't added to the cache; that happens when the
    /// platform reports it.
    pub async fn create_channel(&self, create: CreateChannel) -> Result<GuildChannel, ClientError> {
        let body = to_body(&create)?;
        log::debug!("creating {:?} channel {:?} in guild {}", create.kind, create.name, self.id);
        let data = self
            .rest
            .create_guild_channel(self.id, body, create.reason.as_deref())
            .await?;
        self.channel_from_payload(data)
    }
}

impl Model for Guild {
    type Payload = GuildPayload;

    fn id(&self) -> Snowflake {
        self.id
    }

    /// Only the guild's own fields. Roles, members and channels are left
    /// to the cache, and the fields only sent on first receipt stay as
    /// they were.
    fn apply(&mut self, payload: GuildPayload) {
        self.id = payload.id;
        self.name = payload.name;
        self.icon = payload.icon.or(payload.icon_hash);
        self.splash = payload.splash;
        self.discovery_splash = payload.discovery_splash;
        self.banner = payload.banner;
        self.owner_id = payload.owner_id;
        self.description = payload.description;
        self.afk_timeout = payload.afk_timeout;
        self.premium_subscription_count = payload.premium_subscription_count;
        self.preferred_locale = payload.preferred_locale;
        self.widget_enabled = payload.widget_enabled;
        self.premium_progress_bar_enabled = payload.premium_progress_bar_enabled;
        self.system_channel_flags = payload.system_channel_flags;
        self.verification_level = payload.verification_level;
        self.notification_level = payload.default_message_notifications;
        self.explicit_content_filter = payload.explicit_content_filter;
        self.mfa_level = payload.mfa_level;
        self.premium_tier = payload.premium_tier;
        self.nsfw_level = payload.nsfw_level;
        self.max_presences = payload.max_presences;
        self.max_members = payload.max_members;
        self.max_video_channel_users = payload.max_video_channel_users;
        self.approximate_member_count = payload.approximate_member_count;
        self.approximate_presence_count = payload.approximate_presence_count;
        self.vanity_invite_code = payload.vanity_url_code;
        self.afk_channel_id = payload.afk_channel_id;
        self.widget_channel_id = payload.widget_channel_id;
        self.application_id = payload.application_id;
        self.system_channel_id = payload.system_channel_id;
        self.rules_channel_id = payload.rules_channel_id;
        self.public_updates_channel_id = payload.public_updates_channel_id;
        self.features = payload.features;
    }
}

impl fmt::Debug for Guild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guild")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
