use std::fmt;
use std::sync::{Arc, Weak};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::cache::GuildCache;
use crate::error::ClientError;
use crate::rest::Rest;
use crate::model::Snowflake;

/// Shared lifecycle of everything built from an API payload.
///
/// An entity is created from a payload once and afterwards re-hydrated in
/// place whenever a fresh payload for the same ID shows up. Re-hydration
/// overwrites every field; nothing is merged.
pub trait Model {
    /// The wire shape this entity hydrates from.
    type Payload: DeserializeOwned;

    fn id(&self) -> Snowflake;

    /// Overwrites all fields from an already parsed payload.
    fn apply(&mut self, payload: Self::Payload);

    /// Parses `data` and applies it. A payload that fails to parse leaves
    /// the entity untouched.
    fn update_with_data(&mut self, data: Value) -> Result<(), ClientError> {
        let payload = serde_json::from_value(data)?;
        self.apply(payload);
        log::trace!("re-hydrated entity {}", self.id());
        Ok(())
    }
}

/// Handle to the guild an entity belongs to.
///
/// It doesn't own the guild: the cache is held weakly so entities stored in
/// that cache don't keep it alive. The REST client is shared.
#[derive(Clone)]
pub struct GuildRef {
    pub id: Snowflake,
    rest: Arc<dyn Rest>,
    cache: Weak<dyn GuildCache>,
}

impl GuildRef {
    pub fn new(id: Snowflake, rest: Arc<dyn Rest>, cache: &Arc<dyn GuildCache>) -> Self {
        Self {
            id,
            rest,
            cache: Arc::downgrade(cache),
        }
    }

    pub fn rest(&self) -> &Arc<dyn Rest> {
        &self.rest
    }

    /// The guild's cache, or `None` once the guild has been dropped.
    pub fn cache(&self) -> Option<Arc<dyn GuildCache>> {
        self.cache.upgrade()
    }
}

impl fmt::Debug for GuildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuildRef").field("id", &self.id).finish_non_exhaustive()
    }
}
