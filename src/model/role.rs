use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::model::patch::Patch;
use crate::model::{Model, Snowflake};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePayload {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
    pub icon: Option<String>,
    pub unicode_emoji: Option<String>,
    #[serde(default)]
    pub tags: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    pub position: i64,
    pub color: u32,
    pub hoist: bool,
    pub managed: bool,
    pub mentionable: bool,
    pub icon: Option<String>,
    pub unicode_emoji: Option<String>,
    pub bot_id: Option<Snowflake>,
    pub integration_id: Option<Snowflake>,
    /// Whether this is the guild's booster role.
    pub premium_subscriber: bool,
}

impl Role {
    pub fn from_payload(payload: RolePayload, guild_id: Snowflake) -> Self {
        let mut role = Role {
            id: payload.id,
            guild_id,
            name: String::new(),
            position: 0,
            color: 0,
            hoist: false,
            managed: false,
            mentionable: false,
            icon: None,
            unicode_emoji: None,
            bot_id: None,
            integration_id: None,
            premium_subscriber: false,
        };
        role.apply(payload);
        role
    }

    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }

    pub fn is_bot_managed(&self) -> bool {
        self.bot_id.is_some()
    }

    pub fn is_integration_managed(&self) -> bool {
        self.integration_id.is_some()
    }

    /// The `@everyone` role shares its ID with the guild.
    pub fn is_default(&self) -> bool {
        self.id == self.guild_id
    }
}

fn tag_snowflake(tags: &Map<String, Value>, key: &str) -> Option<Snowflake> {
    tags.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

impl Model for Role {
    type Payload = RolePayload;

    fn id(&self) -> Snowflake {
        self.id
    }

    fn apply(&mut self, payload: RolePayload) {
        self.id = payload.id;
        self.name = payload.name;
        self.position = payload.position;
        self.color = payload.color;
        self.hoist = payload.hoist;
        self.managed = payload.managed;
        self.mentionable = payload.mentionable;
        self.icon = payload.icon;
        self.unicode_emoji = payload.unicode_emoji;
        self.bot_id = tag_snowflake(&payload.tags, "bot_id");
        self.integration_id = tag_snowflake(&payload.tags, "integration_id");
        // always null when present; presence is the flag
        self.premium_subscriber = payload.tags.contains_key("premium_subscriber");
    }
}

/// A role to create with [`Guild::create_role`](crate::model::Guild::create_role).
/// Anything left unset gets the server's default.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateRole {
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    /// Permission bits as a decimal string.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub permissions: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub color: Patch<u32>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub hoist: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub unicode_emoji: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub mentionable: Patch<bool>,
    #[serde(skip)]
    pub reason: Option<String>,
}

impl CreateRole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Set(name.into());
        self
    }
    pub fn permissions(mut self, bits: u64) -> Self {
        self.permissions = Patch::Set(bits.to_string());
        self
    }
    pub fn color(mut self, color: u32) -> Self {
        self.color = Patch::Set(color);
        self
    }
    pub fn hoist(mut self, hoist: bool) -> Self {
        self.hoist = Patch::Set(hoist);
        self
    }
    pub fn unicode_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.unicode_emoji = Patch::Set(emoji.into());
        self
    }
    pub fn mentionable(mut self, mentionable: bool) -> Self {
        self.mentionable = Patch::Set(mentionable);
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
