use std::sync::Arc;
use serde_json::Value;
use crate::cache::{Cache, DefaultCache, DefaultGuildCache, GuildCache};
use crate::error::ClientError;
use crate::model::{Guild, GuildPayload, Snowflake};
use crate::rest::Rest;

/// Picks the cache a new guild gets.
pub type GuildCacheFactory = Arc<dyn Fn(Snowflake) -> Arc<dyn GuildCache> + Send + Sync>;

pub struct ClientBuilder {
    rest: Arc<dyn Rest>,
    cache: Option<Arc<dyn Cache>>,
    guild_cache: Option<GuildCacheFactory>,
}

impl ClientBuilder {
    pub fn new(rest: Arc<dyn Rest>) -> Self {
        Self {
            rest,
            cache: None,
            guild_cache: None,
        }
    }

    /// Replaces the default in-memory user and guild cache.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the cache each guild is built with. Defaults to [`DefaultGuildCache`].
    pub fn guild_cache<F>(mut self, factory: F) -> Self
    where
        F: Fn(Snowflake) -> Arc<dyn GuildCache> + Send + Sync + 'static,
    {
        let factory: GuildCacheFactory = Arc::new(factory);
        self.guild_cache = Some(factory);
        self
    }

    pub fn build(self) -> Client {
        let cache: Arc<dyn Cache> = match self.cache {
            Some(cache) => cache,
            None => Arc::new(DefaultCache::new()),
        };
        let guild_cache: GuildCacheFactory = match self.guild_cache {
            Some(factory) => factory,
            None => Arc::new(default_guild_cache),
        };
        Client {
            rest: self.rest,
            cache,
            guild_cache,
        }
    }
}

fn default_guild_cache(_: Snowflake) -> Arc<dyn GuildCache> {
    Arc::new(DefaultGuildCache::new())
}

/// Owns the REST handle and the top level cache.
#[derive(Clone)]
pub struct Client {
    rest: Arc<dyn Rest>,
    cache: Arc<dyn Cache>,
    guild_cache: GuildCacheFactory,
}

impl Client {
    pub fn builder(rest: Arc<dyn Rest>) -> ClientBuilder {
        ClientBuilder::new(rest)
    }

    pub fn rest(&self) -> &Arc<dyn Rest> {
        &self.rest
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    /// Builds a guild from a full guild payload and caches it, along with
    /// the users of its members.
    ///
    /// Unavailable guilds are built but not cached.
    pub fn add_guild(&self, data: Value) -> Result<Arc<Guild>, ClientError> {
        let payload: GuildPayload = serde_json::from_value(data)?;
        let cache = (self.guild_cache)(payload.id);
        let guild = Arc::new(Guild::from_payload(payload, self.rest.clone(), cache));

        if guild.unavailable {
            log::warn!("guild {} is unavailable, not caching it", guild.id);
            return Ok(guild);
        }
        for member in guild.cache().members() {
            self.cache.add_user(member.user);
        }
        self.cache.add_guild(guild.clone());
        log::info!("guild {} ({}) is ready", guild.id, guild.name);
        Ok(guild)
    }

    pub fn get_guild(&self, guild_id: Snowflake) -> Option<Arc<Guild>> {
        self.cache.get_guild(guild_id)
    }

    pub fn guilds(&self) -> Vec<Arc<Guild>> {
        self.cache.guilds()
    }

    /// Drops a guild from the cache and clears its entity cache.
    pub fn remove_guild(&self, guild_id: Snowflake) -> Option<Arc<Guild>> {
        let guild = self.cache.delete_guild(guild_id)?;
        guild.cache().clear();
        Some(guild)
    }
}
