//! In-memory caches for guilds and the entities inside them.
//!
//! Both caches are traits so a bot can plug in its own storage through
//! [`ClientBuilder`](crate::client::ClientBuilder). Reads hand out clones:
//! editing an entity you got from a cache doesn't write it back, add it
//! again if the cache should see the new state.

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::model::{Guild, GuildChannel, GuildMember, Role, Snowflake, User};

pub trait GuildCache: Send + Sync {
    fn clear(&self);

    /// Sorted by ascending position.
    fn roles(&self) -> Vec<Role>;
    fn get_role(&self, role_id: Snowflake) -> Option<Role>;
    fn add_role(&self, role: Role);
    fn delete_role(&self, role_id: Snowflake) -> Option<Role>;

    fn members(&self) -> Vec<GuildMember>;
    fn get_member(&self, user_id: Snowflake) -> Option<GuildMember>;
    /// Members are keyed by their user's ID.
    fn add_member(&self, member: GuildMember);
    fn delete_member(&self, user_id: Snowflake) -> Option<GuildMember>;

    fn channels(&self) -> Vec<GuildChannel>;
    fn get_channel(&self, channel_id: Snowflake) -> Option<GuildChannel>;
    fn add_channel(&self, channel: GuildChannel);
    fn delete_channel(&self, channel_id: Snowflake) -> Option<GuildChannel>;
}

pub trait Cache: Send + Sync {
    fn clear(&self);

    fn users(&self) -> Vec<User>;
    fn get_user(&self, user_id: Snowflake) -> Option<User>;
    fn add_user(&self, user: User);
    fn delete_user(&self, user_id: Snowflake) -> Option<User>;

    fn guilds(&self) -> Vec<Arc<Guild>>;
    fn get_guild(&self, guild_id: Snowflake) -> Option<Arc<Guild>>;
    fn add_guild(&self, guild: Arc<Guild>);
    fn delete_guild(&self, guild_id: Snowflake) -> Option<Arc<Guild>>;
}

#[derive(Default)]
pub struct DefaultGuildCache {
    roles: RwLock<HashMap<Snowflake, Role>>,
    members: RwLock<HashMap<Snowflake, GuildMember>>,
    channels: RwLock<HashMap<Snowflake, GuildChannel>>,
}

impl DefaultGuildCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GuildCache for DefaultGuildCache {
    fn clear(&self) {
        self.roles.write().clear();
        self.members.write().clear();
        self.channels.write().clear();
    }

    fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.roles.read().values().cloned().collect();
        roles.sort_by_key(|r| r.position);
        roles
    }

    fn get_role(&self, role_id: Snowflake) -> Option<Role> {
        self.roles.read().get(&role_id).cloned()
    }

    fn add_role(&self, role: Role) {
        self.roles.write().insert(role.id, role);
    }

    fn delete_role(&self, role_id: Snowflake) -> Option<Role> {
        self.roles.write().remove(&role_id)
    }

    fn members(&self) -> Vec<GuildMember> {
        self.members.read().values().cloned().collect()
    }

    fn get_member(&self, user_id: Snowflake) -> Option<GuildMember> {
        self.members.read().get(&user_id).cloned()
    }

    fn add_member(&self, member: GuildMember) {
        self.members.write().insert(member.user.id, member);
    }

    fn delete_member(&self, user_id: Snowflake) -> Option<GuildMember> {
        self.members.write().remove(&user_id)
    }

    fn channels(&self) -> Vec<GuildChannel> {
        let mut channels: Vec<GuildChannel> = self.channels.read().values().cloned().collect();
        channels.sort_by_key(|c| (c.position(), c.id()));
        channels
    }

    fn get_channel(&self, channel_id: Snowflake) -> Option<GuildChannel> {
        self.channels.read().get(&channel_id).cloned()
    }

    fn add_channel(&self, channel: GuildChannel) {
        self.channels.write().insert(channel.id(), channel);
    }

    fn delete_channel(&self, channel_id: Snowflake) -> Option<GuildChannel> {
        self.channels.write().remove(&channel_id)
    }
}

#[derive(Default)]
pub struct DefaultCache {
    users: RwLock<HashMap<Snowflake, User>>,
    guilds: RwLock<HashMap<Snowflake, Arc<Guild>>>,
}

impl DefaultCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for DefaultCache {
    fn clear(&self) {
        self.users.write().clear();
        self.guilds.write().clear();
    }

    fn users(&self) -> Vec<User> {
        self.users.read().values().cloned().collect()
    }

    fn get_user(&self, user_id: Snowflake) -> Option<User> {
        self.users.read().get(&user_id).cloned()
    }

    fn add_user(&self, user: User) {
        self.users.write().insert(user.id, user);
    }

    fn delete_user(&self, user_id: Snowflake) -> Option<User> {
        self.users.write().remove(&user_id)
    }

    fn guilds(&self) -> Vec<Arc<Guild>> {
        self.guilds.read().values().cloned().collect()
    }

    fn get_guild(&self, guild_id: Snowflake) -> Option<Arc<Guild>> {
        self.guilds.read().get(&guild_id).cloned()
    }

    fn add_guild(&self, guild: Arc<Guild>) {
        self.guilds.write().insert(guild.id, guild);
    }

    fn delete_guild(&self, guild_id: Snowflake) -> Option<Arc<Guild>> {
        self.guilds.write().remove(&guild_id)
    }
}
