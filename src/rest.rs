use async_trait::async_trait;
use serde_json::{Map, Value};
use crate::error::ClientError;
use crate::model::Snowflake;

/// A partial-update request body: only the keys the caller asked to change.
pub type JsonBody = Map<String, Value>;

/// The REST operations the models and guilds call into.
///
/// This crate doesn't ship a transport. Whatever owns the HTTP client, the
/// token and the rate limiter implements this trait and hands an
/// `Arc<dyn Rest>` to [`Client::builder`](crate::client::Client::builder).
/// Errors should be mapped onto [`ClientError`] as-is: permission failures to
/// [`Forbidden`](ClientError::Forbidden), 404s to
/// [`NotFound`](ClientError::NotFound) and so on. Models never retry.
///
/// `reason` ends up in the guild's audit log.
#[async_trait]
pub trait Rest: Send + Sync {
    async fn delete_channel(
        &self,
        channel_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<(), ClientError>;

    /// Returns the updated channel, or `None` when the server sent an empty body.
    async fn edit_channel(
        &self,
        channel_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Option<Value>, ClientError>;

    async fn kick_guild_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<(), ClientError>;

    async fn edit_guild_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Value, ClientError>;

    async fn get_guild_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<Value, ClientError>;

    /// Members whose username or nickname starts with `query`.
    async fn search_guild_members(
        &self,
        guild_id: Snowflake,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Value>, ClientError>;

    async fn add_guild_member_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<(), ClientError>;

    async fn remove_guild_member_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<(), ClientError>;

    async fn get_guild_channels(&self, guild_id: Snowflake) -> Result<Vec<Value>, ClientError>;

    async fn create_guild_channel(
        &self,
        guild_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Value, ClientError>;

    async fn get_guild_roles(&self, guild_id: Snowflake) -> Result<Vec<Value>, ClientError>;

    async fn create_role(
        &self,
        guild_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Value, ClientError>;

    async fn leave_guild(&self, guild_id: Snowflake) -> Result<(), ClientError>;
}
