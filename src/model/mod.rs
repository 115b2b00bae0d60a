pub mod base;
pub mod cdn;
pub mod channel;
pub mod guild;
pub mod member;
pub mod patch;
pub mod role;
pub mod snowflake;
pub mod user;

pub use base::{GuildRef, Model};
pub use channel::{
    channel_factory, CategoryChannel, Channel, ChannelBase, ChannelConstructor, ChannelPayload,
    ChannelType, CreateChannel, EditCategoryChannel, EditTextChannel, EditVoiceChannel, GuildChannel,
    NewsChannel, StageChannel, TextChannel, VideoQualityMode, VoiceChannel,
};
pub use cdn::ImageFormat;
pub use guild::{Guild, GuildPayload};
pub use member::{AddRoles, EditMember, GuildMember, MemberPayload, RemoveRoles};
pub use patch::Patch;
pub use role::{CreateRole, Role, RolePayload};
pub use snowflake::Snowflake;
pub use user::{User, UserPayload};
