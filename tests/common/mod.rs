#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use guildkit::prelude::*;
use parking_lot::Mutex;
use serde_json::{json, Value};

/// A request the models made, with the body turned back into JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DeleteChannel { channel_id: Snowflake, reason: Option<String> },
    EditChannel { channel_id: Snowflake, body: Value, reason: Option<String> },
    KickMember { user_id: Snowflake, reason: Option<String> },
    EditMember { user_id: Snowflake, body: Value, reason: Option<String> },
    AddRole { user_id: Snowflake, role_id: Snowflake },
    RemoveRole { user_id: Snowflake, role_id: Snowflake },
    GetMember { user_id: Snowflake },
    SearchMembers { query: String, limit: u32 },
    GetChannels,
    CreateChannel { body: Value, reason: Option<String> },
    GetRoles,
    CreateRole { body: Value, reason: Option<String> },
    LeaveGuild { guild_id: Snowflake },
}

/// Records every call and answers with canned responses.
#[derive(Default)]
pub struct MockRest {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<HashMap<&'static str, Value>>,
    forbidden: Mutex<Option<String>>,
}

impl MockRest {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Sets what the named `Rest` method answers with.
    pub fn respond(&self, method: &'static str, data: Value) {
        self.responses.lock().insert(method, data);
    }

    pub fn respond_to_channel_edit(&self, data: Value) {
        self.respond("edit_channel", data);
    }

    pub fn respond_to_member_edit(&self, data: Value) {
        self.respond("edit_guild_member", data);
    }

    fn response(&self, method: &'static str) -> Result<Value, ClientError> {
        self.responses
            .lock()
            .get(method)
            .cloned()
            .ok_or_else(|| ClientError::Api(format!("HTTP 500: no canned response for {}", method)))
    }

    fn list_response(&self, method: &'static str) -> Result<Vec<Value>, ClientError> {
        match self.response(method)? {
            Value::Array(items) => Ok(items),
            other => Err(ClientError::Api(format!("HTTP 500: expected a list, got {}", other))),
        }
    }

    /// Every call after this fails the way a missing permission would.
    pub fn deny(&self, message: &str) {
        *self.forbidden.lock() = Some(message.to_string());
    }

    fn record(&self, call: Call) -> Result<(), ClientError> {
        self.calls.lock().push(call);
        match self.forbidden.lock().clone() {
            Some(message) => Err(ClientError::Forbidden(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Rest for MockRest {
    async fn delete_channel(&self, channel_id: Snowflake, reason: Option<&str>) -> Result<(), ClientError> {
        self.record(Call::DeleteChannel {
            channel_id,
            reason: reason.map(str::to_string),
        })
    }

    async fn edit_channel(
        &self,
        channel_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Option<Value>, ClientError> {
        self.record(Call::EditChannel {
            channel_id,
            body: Value::Object(body),
            reason: reason.map(str::to_string),
        })?;
        Ok(self.responses.lock().get("edit_channel").cloned())
    }

    async fn kick_guild_member(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
        reason: Option<&str>,
    ) -> Result<(), ClientError> {
        self.record(Call::KickMember {
            user_id,
            reason: reason.map(str::to_string),
        })
    }

    async fn edit_guild_member(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Value, ClientError> {
        self.record(Call::EditMember {
            user_id,
            body: Value::Object(body),
            reason: reason.map(str::to_string),
        })?;
        self.response("edit_guild_member")
    }

    async fn add_guild_member_role(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
        _reason: Option<&str>,
    ) -> Result<(), ClientError> {
        self.record(Call::AddRole { user_id, role_id })
    }

    async fn remove_guild_member_role(
        &self,
        _guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
        _reason: Option<&str>,
    ) -> Result<(), ClientError> {
        self.record(Call::RemoveRole { user_id, role_id })
    }

    async fn get_guild_member(&self, _guild_id: Snowflake, user_id: Snowflake) -> Result<Value, ClientError> {
        self.record(Call::GetMember { user_id })?;
        self.response("get_guild_member")
    }

    async fn search_guild_members(
        &self,
        _guild_id: Snowflake,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Value>, ClientError> {
        self.record(Call::SearchMembers {
            query: query.to_string(),
            limit,
        })?;
        self.list_response("search_guild_members")
    }

    async fn get_guild_channels(&self, _guild_id: Snowflake) -> Result<Vec<Value>, ClientError> {
        self.record(Call::GetChannels)?;
        self.list_response("get_guild_channels")
    }

    async fn create_guild_channel(
        &self,
        _guild_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Value, ClientError> {
        self.record(Call::CreateChannel {
            body: Value::Object(body),
            reason: reason.map(str::to_string),
        })?;
        self.response("create_guild_channel")
    }

    async fn get_guild_roles(&self, _guild_id: Snowflake) -> Result<Vec<Value>, ClientError> {
        self.record(Call::GetRoles)?;
        self.list_response("get_guild_roles")
    }

    async fn create_role(
        &self,
        _guild_id: Snowflake,
        body: JsonBody,
        reason: Option<&str>,
    ) -> Result<Value, ClientError> {
        self.record(Call::CreateRole {
            body: Value::Object(body),
            reason: reason.map(str::to_string),
        })?;
        self.response("create_role")
    }

    async fn leave_guild(&self, guild_id: Snowflake) -> Result<(), ClientError> {
        self.record(Call::LeaveGuild { guild_id })
    }
}

pub const GUILD_ID: u64 = 1;
pub const ROLE_A: u64 = 10;
pub const ROLE_B: u64 = 11;
pub const ALICE: u64 = 100;
pub const BOB: u64 = 101;
pub const CATEGORY: u64 = 200;
pub const GENERAL: u64 = 201;
pub const LOUNGE: u64 = 202;
pub const ANNOUNCEMENTS: u64 = 203;
pub const FORUM: u64 = 204;

pub fn member_json(user_id: u64, username: &str, roles: &[u64]) -> Value {
    json!({
        "user": { "id": user_id.to_string(), "username": username },
        "joined_at": "2021-03-01T10:00:00Z",
        "roles": roles.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
    })
}

/// A guild with a category holding a text and a voice channel, a news
/// channel outside it, a channel of a kind this crate doesn't model, two
/// roles on top of `@everyone` and two members.
pub fn guild_json() -> Value {
    json!({
        "id": GUILD_ID.to_string(),
        "name": "Test Guild",
        "owner_id": ALICE.to_string(),
        "member_count": 2,
        "roles": [
            { "id": ROLE_B.to_string(), "name": "B", "position": 2 },
            { "id": GUILD_ID.to_string(), "name": "@everyone", "position": 0 },
            { "id": ROLE_A.to_string(), "name": "A", "position": 1 },
        ],
        "members": [
            {
                "user": { "id": ALICE.to_string(), "username": "alice", "avatar": "a_userhash" },
                "nick": null,
                "joined_at": "2021-03-01T10:00:00Z",
                "roles": [ROLE_A.to_string()],
            },
            {
                "user": { "id": BOB.to_string(), "username": "bob", "avatar": "plainhash" },
                "nick": "Bobby",
                "avatar": "a_guildhash",
                "joined_at": "2021-04-01T10:00:00Z",
                "premium_since": "2022-01-01T00:00:00Z",
                "roles": [],
            },
        ],
        "channels": [
            { "id": CATEGORY.to_string(), "type": 4, "name": "Chat", "position": 0 },
            {
                "id": GENERAL.to_string(),
                "type": 0,
                "name": "general",
                "position": 1,
                "parent_id": CATEGORY.to_string(),
                "topic": "hello",
                "nsfw": true,
            },
            {
                "id": LOUNGE.to_string(),
                "type": 2,
                "name": "Lounge",
                "position": 2,
                "parent_id": CATEGORY.to_string(),
                "bitrate": 64000,
            },
            { "id": ANNOUNCEMENTS.to_string(), "type": 5, "name": "announcements", "position": 3 },
            { "id": FORUM.to_string(), "type": 15, "name": "help", "position": 4 },
        ],
    })
}

pub fn build_guild(rest: &Arc<MockRest>) -> Guild {
    let rest: Arc<dyn Rest> = rest.clone();
    Guild::new(guild_json(), rest).unwrap()
}

pub fn text_channel(guild: &Guild, id: u64) -> TextChannel {
    match guild.cache().get_channel(Snowflake(id)) {
        Some(GuildChannel::Text(c)) | Some(GuildChannel::News(c)) => c,
        other => panic!("expected a text channel, got {:?}", other),
    }
}

pub fn voice_channel(guild: &Guild, id: u64) -> VoiceChannel {
    match guild.cache().get_channel(Snowflake(id)) {
        Some(GuildChannel::Voice(c)) | Some(GuildChannel::Stage(c)) => c,
        other => panic!("expected a voice channel, got {:?}", other),
    }
}

pub fn category_channel(guild: &Guild, id: u64) -> CategoryChannel {
    match guild.cache().get_channel(Snowflake(id)) {
        Some(GuildChannel::Category(c)) => c,
        other => panic!("expected a category, got {:?}", other),
    }
}

pub fn member(guild: &Guild, user_id: u64) -> GuildMember {
    guild.cache().get_member(Snowflake(user_id)).unwrap()
}

pub fn role(guild: &Guild, role_id: u64) -> Role {
    guild.cache().get_role(Snowflake(role_id)).unwrap()
}
