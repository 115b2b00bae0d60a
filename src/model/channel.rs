//! Guild channels.
//!
//! Every channel shares a [`ChannelBase`]. The concrete kinds embed it and
//! add their own fields and their own `edit`. [`GuildChannel`] is the closed
//! set of kinds, picked from the payload's `type` code by [`channel_factory`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use crate::error::{ClientError, ValidationError};
use crate::model::patch::{to_body, Patch};
use crate::model::{GuildRef, Model, Snowflake};
use crate::rest::JsonBody;

/// Auto archive durations (in minutes) the API accepts.
pub const AUTO_ARCHIVE_DURATIONS: [u32; 4] = [60, 1440, 4320, 10080];

pub const MIN_BITRATE: u32 = 8_000;
pub const MAX_BITRATE: u32 = 128_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelType {
    Text = 0,
    Dm = 1,
    Voice = 2,
    Group = 3,
    Category = 4,
    News = 5,
    Store = 6,
    NewsThread = 10,
    PublicThread = 11,
    PrivateThread = 12,
    Stage = 13,
}

impl ChannelType {
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => Self::Text,
            1 => Self::Dm,
            2 => Self::Voice,
            3 => Self::Group,
            4 => Self::Category,
            5 => Self::News,
            6 => Self::Store,
            10 => Self::NewsThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::Stage,
            _ => return None,
        })
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

impl Serialize for ChannelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VideoQualityMode {
    Auto = 1,
    Full = 2,
}

impl VideoQualityMode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Auto),
            2 => Some(Self::Full),
            _ => None,
        }
    }
}

impl Serialize for VideoQualityMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

fn default_position() -> i64 {
    1
}

fn default_auto_archive_duration() -> u32 {
    60
}

fn default_video_quality_mode() -> u8 {
    VideoQualityMode::Auto as u8
}

/// Every field any guild channel kind can carry. Kinds only read the
/// fields they know about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPayload {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: u32,
    pub name: String,
    #[serde(default = "default_position")]
    pub position: i64,
    pub parent_id: Option<Snowflake>,
    pub topic: Option<String>,
    pub last_message_id: Option<Snowflake>,
    #[serde(default)]
    pub rate_limit_per_user: u32,
    #[serde(default = "default_auto_archive_duration")]
    pub default_auto_archive_duration: u32,
    #[serde(default)]
    pub nsfw: bool,
    pub last_pin_timestamp: Option<DateTime<Utc>>,
    pub bitrate: Option<u32>,
    pub rtc_region: Option<String>,
    #[serde(default)]
    pub user_limit: u32,
    #[serde(default = "default_video_quality_mode")]
    pub video_quality_mode: u8,
}

/// Fields common to every guild channel.
#[derive(Debug, Clone)]
pub struct ChannelBase {
    pub guild: GuildRef,
    pub id: Snowflake,
    /// The raw `type` code. See [`ChannelType`].
    pub kind: u32,
    pub name: String,
    /// Ordering key. Not guaranteed to be contiguous.
    pub position: i64,
    /// The category this channel sits in, if any.
    pub parent_id: Option<Snowflake>,
}

impl ChannelBase {
    pub fn from_payload(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self {
            guild,
            id: payload.id,
            kind: payload.kind,
            name: payload.name,
            position: payload.position,
            parent_id: payload.parent_id,
        }
    }

    pub fn channel_type(&self) -> Option<ChannelType> {
        ChannelType::from_code(self.kind)
    }

    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }

    /// Deletes this channel. Needs `manage_channels`.
    ///
    /// Nothing local changes; dropping the channel from the guild cache is
    /// up to the caller.
    pub async fn delete(&self, reason: Option<&str>) -> Result<(), ClientError> {
        log::debug!("deleting channel {}", self.id);
        self.guild.rest().delete_channel(self.id, reason).await
    }
}

impl Model for ChannelBase {
    type Payload = ChannelPayload;

    fn id(&self) -> Snowflake {
        self.id
    }

    fn apply(&mut self, payload: ChannelPayload) {
        *self = Self::from_payload(payload, self.guild.clone());
    }
}

/// What every channel kind can do.
#[async_trait]
pub trait Channel: Send + Sync {
    fn base(&self) -> &ChannelBase;

    fn name(&self) -> &str {
        &self.base().name
    }

    fn mention(&self) -> String {
        self.base().mention()
    }

    async fn delete(&self, reason: Option<&str>) -> Result<(), ClientError> {
        self.base().delete(reason).await
    }
}

impl Channel for ChannelBase {
    fn base(&self) -> &ChannelBase {
        self
    }
}

/// Sends an edit and hands back the payload to re-hydrate from.
///
/// An empty body means there's nothing to change, so no request is made.
/// `None` comes back then, and for an empty response too.
async fn request_edit(
    base: &ChannelBase,
    body: JsonBody,
    reason: Option<&str>,
) -> Result<Option<Value>, ClientError> {
    if body.is_empty() {
        log::debug!("nothing to edit on channel {}, skipping request", base.id);
        return Ok(None);
    }

    log::debug!("editing channel {} ({:?})", base.id, body.keys().collect::<Vec<_>>());
    let data = base.guild.rest().edit_channel(base.id, body, reason).await?;
    Ok(data.filter(|data| !is_empty_payload(data)))
}

fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// A text channel. News channels share this shape.
#[derive(Debug, Clone)]
pub struct TextChannel {
    pub base: ChannelBase,
    pub topic: Option<String>,
    /// May point at a message that no longer exists.
    pub last_message_id: Option<Snowflake>,
    /// Seconds between messages per user. `0` is off.
    pub slowmode_delay: u32,
    pub nsfw: bool,
    /// Minutes of inactivity before threads here are archived.
    pub default_auto_archive_duration: u32,
    pub last_pin_timestamp: Option<DateTime<Utc>>,
}

/// News channels only differ from text channels by their `type` code.
pub type NewsChannel = TextChannel;

impl TextChannel {
    pub fn from_payload(mut payload: ChannelPayload, guild: GuildRef) -> Self {
        Self {
            topic: payload.topic.take(),
            last_message_id: payload.last_message_id,
            slowmode_delay: payload.rate_limit_per_user,
            nsfw: payload.nsfw,
            default_auto_archive_duration: payload.default_auto_archive_duration,
            last_pin_timestamp: payload.last_pin_timestamp,
            base: ChannelBase::from_payload(payload, guild),
        }
    }

    pub fn is_news(&self) -> bool {
        self.base.kind == ChannelType::News.code()
    }

    /// Edits the channel and updates it in place from the response.
    ///
    /// Needs `manage_channels`. Bad values are rejected before any request
    /// is made. A type change only updates [`kind`](ChannelBase::kind) here;
    /// use [`GuildChannel::edit_text`] to get the matching variant back.
    pub async fn edit(&mut self, edit: EditTextChannel) -> Result<(), ClientError> {
        let reason = edit.reason.clone();
        let body = edit.into_body()?;
        if let Some(data) = request_edit(&self.base, body, reason.as_deref()).await? {
            self.update_with_data(data)?;
        }
        Ok(())
    }
}

impl Model for TextChannel {
    type Payload = ChannelPayload;

    fn id(&self) -> Snowflake {
        self.base.id
    }

    fn apply(&mut self, payload: ChannelPayload) {
        *self = Self::from_payload(payload, self.base.guild.clone());
    }
}

impl Channel for TextChannel {
    fn base(&self) -> &ChannelBase {
        &self.base
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditTextChannel {
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    /// Only [`ChannelType::Text`] and [`ChannelType::News`] are allowed.
    #[serde(rename = "type", skip_serializing_if = "Patch::is_unset")]
    pub kind: Patch<ChannelType>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub position: Patch<i64>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub nsfw: Patch<bool>,
    /// `Null` takes the channel out of its category.
    #[serde(rename = "parent_id", skip_serializing_if = "Patch::is_unset")]
    pub parent: Patch<Snowflake>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub topic: Patch<String>,
    /// `Null` disables slowmode, same as `0`.
    #[serde(rename = "rate_limit_per_user", skip_serializing_if = "Patch::is_unset")]
    pub slowmode_delay: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub default_auto_archive_duration: Patch<u32>,
    #[serde(skip)]
    pub reason: Option<String>,
}

impl EditTextChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Set(name.into());
        self
    }
    pub fn kind(mut self, kind: ChannelType) -> Self {
        self.kind = Patch::Set(kind);
        self
    }
    pub fn position(mut self, position: i64) -> Self {
        self.position = Patch::Set(position);
        self
    }
    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Patch::Set(nsfw);
        self
    }
    pub fn parent(mut self, parent: Option<&CategoryChannel>) -> Self {
        self.parent = Patch::from_option(parent.map(|c| c.base.id));
        self
    }
    pub fn topic(mut self, topic: Option<String>) -> Self {
        self.topic = Patch::from_option(topic);
        self
    }
    pub fn slowmode_delay(mut self, seconds: Option<u32>) -> Self {
        self.slowmode_delay = Patch::from_option(seconds);
        self
    }
    pub fn default_auto_archive_duration(mut self, minutes: u32) -> Self {
        self.default_auto_archive_duration = Patch::Set(minutes);
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub(crate) fn into_body(mut self) -> Result<JsonBody, ClientError> {
        match self.kind {
            Patch::Set(ChannelType::Text | ChannelType::News) | Patch::Unset => {}
            Patch::Set(other) => {
                return Err(ValidationError::UnsupportedChannelType(Some(other.code())).into())
            }
            Patch::Null => return Err(ValidationError::UnsupportedChannelType(None).into()),
        }
        match self.default_auto_archive_duration {
            Patch::Set(d) if !AUTO_ARCHIVE_DURATIONS.contains(&d) => {
                return Err(ValidationError::InvalidAutoArchiveDuration(Some(d)).into())
            }
            Patch::Null => return Err(ValidationError::InvalidAutoArchiveDuration(None).into()),
            _ => {}
        }
        self.slowmode_delay = self.slowmode_delay.null_as(0);
        to_body(&self)
    }
}

/// A category that groups other channels.
#[derive(Debug, Clone)]
pub struct CategoryChannel {
    pub base: ChannelBase,
}

impl CategoryChannel {
    pub fn from_payload(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self {
            base: ChannelBase::from_payload(payload, guild),
        }
    }

    /// Channels in this category, read from the guild cache on every call.
    ///
    /// Empty once the guild is gone.
    pub fn channels(&self) -> Vec<GuildChannel> {
        let Some(cache) = self.base.guild.cache() else {
            return Vec::new();
        };
        cache
            .channels()
            .into_iter()
            .filter(|c| c.parent_id() == Some(self.base.id))
            .collect()
    }

    pub async fn edit(&mut self, edit: EditCategoryChannel) -> Result<(), ClientError> {
        let reason = edit.reason.clone();
        let body = to_body(&edit)?;
        if let Some(data) = request_edit(&self.base, body, reason.as_deref()).await? {
            self.update_with_data(data)?;
        }
        Ok(())
    }
}

impl Model for CategoryChannel {
    type Payload = ChannelPayload;

    fn id(&self) -> Snowflake {
        self.base.id
    }

    fn apply(&mut self, payload: ChannelPayload) {
        self.base.apply(payload);
    }
}

impl Channel for CategoryChannel {
    fn base(&self) -> &ChannelBase {
        &self.base
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditCategoryChannel {
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub position: Patch<i64>,
    #[serde(skip)]
    pub reason: Option<String>,
}

impl EditCategoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Set(name.into());
        self
    }
    pub fn position(mut self, position: i64) -> Self {
        self.position = Patch::Set(position);
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A voice channel. Stage channels share this shape.
#[derive(Debug, Clone)]
pub struct VoiceChannel {
    pub base: ChannelBase,
    /// In bits.
    pub bitrate: Option<u32>,
    /// `None` means the region is picked automatically.
    pub rtc_region: Option<String>,
    /// `0` means no limit.
    pub user_limit: u32,
    /// See [`VideoQualityMode`].
    pub video_quality_mode: u8,
}

pub type StageChannel = VoiceChannel;

impl VoiceChannel {
    pub fn from_payload(mut payload: ChannelPayload, guild: GuildRef) -> Self {
        Self {
            bitrate: payload.bitrate,
            rtc_region: payload.rtc_region.take(),
            user_limit: payload.user_limit,
            video_quality_mode: payload.video_quality_mode,
            base: ChannelBase::from_payload(payload, guild),
        }
    }

    pub fn is_stage(&self) -> bool {
        self.base.kind == ChannelType::Stage.code()
    }

    pub fn video_quality(&self) -> Option<VideoQualityMode> {
        VideoQualityMode::from_code(self.video_quality_mode)
    }

    /// Edits the channel and updates it in place from the response.
    ///
    /// Needs `manage_channels`. A bitrate outside 8000..=128000 is rejected
    /// before any request is made.
    pub async fn edit(&mut self, edit: EditVoiceChannel) -> Result<(), ClientError> {
        let reason = edit.reason.clone();
        let body = edit.into_body()?;
        if let Some(data) = request_edit(&self.base, body, reason.as_deref()).await? {
            self.update_with_data(data)?;
        }
        Ok(())
    }
}

impl Model for VoiceChannel {
    type Payload = ChannelPayload;

    fn id(&self) -> Snowflake {
        self.base.id
    }

    fn apply(&mut self, payload: ChannelPayload) {
        *self = Self::from_payload(payload, self.base.guild.clone());
    }
}

impl Channel for VoiceChannel {
    fn base(&self) -> &ChannelBase {
        &self.base
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditVoiceChannel {
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub position: Patch<i64>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub bitrate: Patch<u32>,
    #[serde(rename = "parent_id", skip_serializing_if = "Patch::is_unset")]
    pub parent: Patch<Snowflake>,
    /// `Null` switches back to automatic region selection.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub rtc_region: Patch<String>,
    /// `Null` and `0` both remove the limit.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub user_limit: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub video_quality_mode: Patch<VideoQualityMode>,
    #[serde(skip)]
    pub reason: Option<String>,
}

impl EditVoiceChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Set(name.into());
        self
    }
    pub fn position(mut self, position: i64) -> Self {
        self.position = Patch::Set(position);
        self
    }
    pub fn bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = Patch::Set(bitrate);
        self
    }
    pub fn parent(mut self, parent: Option<&CategoryChannel>) -> Self {
        self.parent = Patch::from_option(parent.map(|c| c.base.id));
        self
    }
    pub fn rtc_region(mut self, region: Option<String>) -> Self {
        self.rtc_region = Patch::from_option(region);
        self
    }
    pub fn user_limit(mut self, limit: Option<u32>) -> Self {
        self.user_limit = Patch::from_option(limit);
        self
    }
    pub fn video_quality_mode(mut self, mode: VideoQualityMode) -> Self {
        self.video_quality_mode = Patch::Set(mode);
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub(crate) fn into_body(mut self) -> Result<JsonBody, ClientError> {
        match self.bitrate {
            Patch::Set(b) if !(MIN_BITRATE..=MAX_BITRATE).contains(&b) => {
                return Err(ValidationError::BitrateOutOfRange(Some(b)).into())
            }
            Patch::Null => return Err(ValidationError::BitrateOutOfRange(None).into()),
            _ => {}
        }
        self.user_limit = self.user_limit.null_as(0);
        to_body(&self)
    }
}

/// A channel to create with [`Guild::create_channel`](crate::model::Guild::create_channel).
///
/// Only `name` and `kind` are required. Which of the other fields apply
/// depends on the kind; the server rejects the ones that don't.
#[derive(Debug, Clone, Serialize)]
pub struct CreateChannel {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub topic: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub bitrate: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub user_limit: Patch<u32>,
    #[serde(rename = "rate_limit_per_user", skip_serializing_if = "Patch::is_unset")]
    pub slowmode_delay: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub position: Patch<i64>,
    #[serde(rename = "parent_id", skip_serializing_if = "Patch::is_unset")]
    pub parent: Patch<Snowflake>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub nsfw: Patch<bool>,
    #[serde(skip)]
    pub reason: Option<String>,
}

impl CreateChannel {
    pub fn new(kind: ChannelType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            topic: Patch::Unset,
            bitrate: Patch::Unset,
            user_limit: Patch::Unset,
            slowmode_delay: Patch::Unset,
            position: Patch::Unset,
            parent: Patch::Unset,
            nsfw: Patch::Unset,
            reason: None,
        }
    }

    pub fn topic(mut self, topic: Option<String>) -> Self {
        self.topic = Patch::from_option(topic);
        self
    }
    pub fn bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = Patch::Set(bitrate);
        self
    }
    pub fn user_limit(mut self, limit: Option<u32>) -> Self {
        self.user_limit = Patch::from_option(limit);
        self
    }
    pub fn slowmode_delay(mut self, seconds: Option<u32>) -> Self {
        self.slowmode_delay = Patch::from_option(seconds);
        self
    }
    pub fn position(mut self, position: i64) -> Self {
        self.position = Patch::Set(position);
        self
    }
    pub fn parent(mut self, parent: Option<&CategoryChannel>) -> Self {
        self.parent = Patch::from_option(parent.map(|c| c.base.id));
        self
    }
    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Patch::Set(nsfw);
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Any guild channel, tagged by kind.
///
/// Codes this crate doesn't know about end up as [`Other`](GuildChannel::Other)
/// with only the shared fields, so new channel kinds don't break hydration.
#[derive(Debug, Clone)]
pub enum GuildChannel {
    Text(TextChannel),
    News(NewsChannel),
    Category(CategoryChannel),
    Voice(VoiceChannel),
    Stage(StageChannel),
    Other(ChannelBase),
}

/// Builds a [`GuildChannel`] from a parsed payload.
pub type ChannelConstructor = fn(ChannelPayload, GuildRef) -> GuildChannel;

/// Maps a channel `type` code to the constructor for its kind.
pub fn channel_factory(kind: u32) -> ChannelConstructor {
    match ChannelType::from_code(kind) {
        Some(ChannelType::Text) => GuildChannel::new_text as ChannelConstructor,
        Some(ChannelType::News) => GuildChannel::new_news,
        Some(ChannelType::Category) => GuildChannel::new_category,
        Some(ChannelType::Voice) => GuildChannel::new_voice,
        Some(ChannelType::Stage) => GuildChannel::new_stage,
        _ => GuildChannel::new_other,
    }
}

impl GuildChannel {
    fn new_text(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self::Text(TextChannel::from_payload(payload, guild))
    }

    fn new_news(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self::News(TextChannel::from_payload(payload, guild))
    }

    fn new_category(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self::Category(CategoryChannel::from_payload(payload, guild))
    }

    fn new_voice(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self::Voice(VoiceChannel::from_payload(payload, guild))
    }

    fn new_stage(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self::Stage(VoiceChannel::from_payload(payload, guild))
    }

    fn new_other(payload: ChannelPayload, guild: GuildRef) -> Self {
        Self::Other(ChannelBase::from_payload(payload, guild))
    }

    pub fn from_payload(data: Value, guild: GuildRef) -> Result<Self, ClientError> {
        let payload: ChannelPayload = serde_json::from_value(data)?;
        Ok(channel_factory(payload.kind)(payload, guild))
    }

    pub fn base(&self) -> &ChannelBase {
        match self {
            Self::Text(c) | Self::News(c) => &c.base,
            Self::Category(c) => &c.base,
            Self::Voice(c) | Self::Stage(c) => &c.base,
            Self::Other(base) => base,
        }
    }

    pub fn id(&self) -> Snowflake {
        self.base().id
    }

    pub fn kind(&self) -> u32 {
        self.base().kind
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn position(&self) -> i64 {
        self.base().position
    }

    pub fn parent_id(&self) -> Option<Snowflake> {
        self.base().parent_id
    }

    pub fn mention(&self) -> String {
        self.base().mention()
    }

    pub async fn delete(&self, reason: Option<&str>) -> Result<(), ClientError> {
        self.base().delete(reason).await
    }

    pub fn as_text(&self) -> Option<&TextChannel> {
        match self {
            Self::Text(c) | Self::News(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextChannel> {
        match self {
            Self::Text(c) | Self::News(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&CategoryChannel> {
        match self {
            Self::Category(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_category_mut(&mut self) -> Option<&mut CategoryChannel> {
        match self {
            Self::Category(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_voice(&self) -> Option<&VoiceChannel> {
        match self {
            Self::Voice(c) | Self::Stage(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_voice_mut(&mut self) -> Option<&mut VoiceChannel> {
        match self {
            Self::Voice(c) | Self::Stage(c) => Some(c),
            _ => None,
        }
    }

    /// Edits a text or news channel.
    ///
    /// Same as [`TextChannel::edit`], but the response goes through
    /// [`update_with_data`](GuildChannel::update_with_data), so converting a
    /// text channel to news leaves a [`News`](GuildChannel::News) variant.
    pub async fn edit_text(&mut self, edit: EditTextChannel) -> Result<(), ClientError> {
        if self.as_text().is_none() {
            return Err(ValidationError::ChannelKindMismatch(self.kind()).into());
        }
        let reason = edit.reason.clone();
        let body = edit.into_body()?;
        self.send_edit(body, reason.as_deref()).await
    }

    /// Edits a voice or stage channel. See [`VoiceChannel::edit`].
    pub async fn edit_voice(&mut self, edit: EditVoiceChannel) -> Result<(), ClientError> {
        if self.as_voice().is_none() {
            return Err(ValidationError::ChannelKindMismatch(self.kind()).into());
        }
        let reason = edit.reason.clone();
        let body = edit.into_body()?;
        self.send_edit(body, reason.as_deref()).await
    }

    pub async fn edit_category(&mut self, edit: EditCategoryChannel) -> Result<(), ClientError> {
        if self.as_category().is_none() {
            return Err(ValidationError::ChannelKindMismatch(self.kind()).into());
        }
        let reason = edit.reason.clone();
        let body = to_body(&edit)?;
        self.send_edit(body, reason.as_deref()).await
    }

    async fn send_edit(&mut self, body: JsonBody, reason: Option<&str>) -> Result<(), ClientError> {
        if let Some(data) = request_edit(self.base(), body, reason).await? {
            self.update_with_data(data)?;
        }
        Ok(())
    }

    /// Re-hydrates from a fresh payload.
    ///
    /// If the `type` code moved to another kind (a text channel converted to
    /// news, say), the channel is rebuilt as that kind instead.
    pub fn update_with_data(&mut self, data: Value) -> Result<(), ClientError> {
        let payload: ChannelPayload = serde_json::from_value(data)?;
        match (self, ChannelType::from_code(payload.kind)) {
            (Self::Text(c), Some(ChannelType::Text)) | (Self::News(c), Some(ChannelType::News)) => {
                c.apply(payload)
            }
            (Self::Category(c), Some(ChannelType::Category)) => c.apply(payload),
            (Self::Voice(c), Some(ChannelType::Voice)) | (Self::Stage(c), Some(ChannelType::Stage)) => {
                c.apply(payload)
            }
            (Self::Other(base), kind)
                if !matches!(
                    kind,
                    Some(
                        ChannelType::Text
                            | ChannelType::News
                            | ChannelType::Category
                            | ChannelType::Voice
                            | ChannelType::Stage
                    )
                ) =>
            {
                base.apply(payload)
            }
            (this, _) => {
                log::debug!("channel {} changed kind to {}", payload.id, payload.kind);
                let guild = this.base().guild.clone();
                *this = channel_factory(payload.kind)(payload, guild);
            }
        }
        Ok(())
    }
}
