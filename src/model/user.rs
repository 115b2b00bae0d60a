use serde::{Deserialize, Serialize};
use crate::model::{Model, Snowflake};

/// Avatar and banner hashes with this prefix are animated.
pub const ANIMATED_PREFIX: &str = "a_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: Snowflake,
    #[serde(default)]
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub system: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub bot: bool,
    pub system: bool,
}

impl User {
    pub fn from_payload(payload: UserPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.username,
            discriminator: payload.discriminator,
            avatar: payload.avatar,
            banner: payload.banner,
            bot: payload.bot,
            system: payload.system,
        }
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    pub fn is_avatar_animated(&self) -> bool {
        self.avatar
            .as_deref()
            .is_some_and(|a| a.starts_with(ANIMATED_PREFIX))
    }
}

impl Model for User {
    type Payload = UserPayload;

    fn id(&self) -> Snowflake {
        self.id
    }

    fn apply(&mut self, payload: UserPayload) {
        *self = User::from_payload(payload);
    }
}
