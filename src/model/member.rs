use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::ClientError;
use crate::model::patch::{to_body, Patch};
use crate::model::user::{UserPayload, ANIMATED_PREFIX};
use crate::model::{GuildRef, Model, Role, Snowflake, User};
use crate::rest::JsonBody;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPayload {
    pub user: UserPayload,
    pub nick: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub pending: bool,
    pub joined_at: DateTime<Utc>,
    pub premium_since: Option<DateTime<Utc>>,
    pub communication_disabled_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

/// A user's membership in a guild.
///
/// `roles` is resolved from the guild's role cache when the member is
/// hydrated and isn't kept in sync afterwards. If the role cache changes,
/// re-hydrate the member to pick that up. `roles[i]` is the role for
/// `role_ids[i]`, or `None` when the cache didn't have it.
#[derive(Debug, Clone)]
pub struct GuildMember {
    pub guild: GuildRef,
    /// Replaced wholesale on every re-hydration.
    pub user: User,
    pub nickname: Option<String>,
    /// Guild-specific avatar hash.
    pub avatar: Option<String>,
    pub deaf: bool,
    pub mute: bool,
    /// Whether the member still has to pass membership screening.
    pub pending: bool,
    pub joined_at: DateTime<Utc>,
    /// Set while the member is boosting the guild.
    pub premium_since: Option<DateTime<Utc>>,
    /// Can be in the past, see [`is_timed_out`](GuildMember::is_timed_out).
    pub timeout_until: Option<DateTime<Utc>>,
    pub role_ids: Vec<Snowflake>,
    pub roles: Vec<Option<Role>>,
}

impl GuildMember {
    pub fn from_payload(payload: MemberPayload, guild: GuildRef) -> Self {
        let user = User::from_payload(payload.user);
        let roles = resolve_roles(&guild, &payload.roles, user.id);
        Self {
            guild,
            user,
            nickname: payload.nick,
            avatar: payload.avatar,
            deaf: payload.deaf,
            mute: payload.mute,
            pending: payload.pending,
            joined_at: payload.joined_at,
            premium_since: payload.premium_since,
            timeout_until: payload.communication_disabled_until,
            role_ids: payload.roles,
            roles,
        }
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.user.id)
    }

    /// The nickname, or the user's name when there isn't one.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.user.name)
    }

    /// The guild avatar, or the user's avatar when there isn't one.
    pub fn display_avatar(&self) -> Option<&str> {
        self.avatar.as_deref().or(self.user.avatar.as_deref())
    }

    /// With `guild_only`, only the guild avatar is checked. Otherwise
    /// whichever avatar [`display_avatar`](GuildMember::display_avatar) picks.
    pub fn is_avatar_animated(&self, guild_only: bool) -> bool {
        let avatar = if guild_only {
            self.avatar.as_deref()
        } else {
            self.display_avatar()
        };
        avatar.is_some_and(|a| a.starts_with(ANIMATED_PREFIX))
    }

    pub fn is_boosting(&self) -> bool {
        self.premium_since.is_some()
    }

    /// Checked against the current time on every call.
    pub fn is_timed_out(&self) -> bool {
        self.timeout_until.is_some_and(|until| until > Utc::now())
    }

    /// Kicks the member. Needs `kick_members`.
    pub async fn kick(&self, reason: Option<&str>) -> Result<(), ClientError> {
        log::debug!("kicking member {} from guild {}", self.user.id, self.guild.id);
        self.guild
            .rest()
            .kick_guild_member(self.guild.id, self.user.id, reason)
            .await
    }

    /// Edits the member and updates it in place from the response.
    ///
    /// Passing `roles` replaces every role the member has.
    pub async fn edit(&mut self, edit: EditMember) -> Result<(), ClientError> {
        let reason = edit.reason.clone();
        let body = edit.into_body()?;
        if body.is_empty() {
            log::debug!("nothing to edit on member {}, skipping request", self.user.id);
            return Ok(());
        }

        log::debug!(
            "editing member {} in guild {} ({:?})",
            self.user.id,
            self.guild.id,
            body.keys().collect::<Vec<_>>()
        );
        let rest = self.guild.rest().clone();
        let data = rest
            .edit_guild_member(self.guild.id, self.user.id, body, reason.as_deref())
            .await?;
        self.update_with_data(data)
    }

    /// Adds roles to the member and returns the ones a request was made for.
    ///
    /// With `overwrite`, the given roles replace the member's roles in one
    /// edit and the member's resolved roles are returned instead. Roles the
    /// guild cache doesn't have are left out of that list, so it can be
    /// shorter than [`role_ids`](GuildMember::role_ids); check
    /// [`roles`](GuildMember::roles) for the `None` entries. Otherwise one
    /// request goes out per role, in order, and the member isn't refreshed
    /// afterwards.
    pub async fn add_roles(&mut self, roles: &[Role], options: AddRoles) -> Result<Vec<Role>, ClientError> {
        if options.overwrite && !roles.is_empty() {
            let mut edit = EditMember::new().roles(Some(roles));
            edit.reason = options.reason;
            self.edit(edit).await?;
            return Ok(self.resolved_roles());
        }

        let mut added = Vec::new();
        for role in roles {
            if options.ignore_extra && self.role_ids.contains(&role.id) {
                log::debug!("member {} already has role {}, skipping", self.user.id, role.id);
                continue;
            }
            self.guild
                .rest()
                .add_guild_member_role(self.guild.id, self.user.id, role.id, options.reason.as_deref())
                .await?;
            added.push(role.clone());
        }
        Ok(added)
    }

    /// Removes roles from the member and returns the ones a request was made for.
    ///
    /// With no roles at all, every role is removed in one edit and the
    /// member's resolved roles are returned, minus any the guild cache
    /// doesn't have. Otherwise this mirrors
    /// [`add_roles`](GuildMember::add_roles).
    pub async fn remove_roles(&mut self, roles: &[Role], options: RemoveRoles) -> Result<Vec<Role>, ClientError> {
        if roles.is_empty() {
            let mut edit = EditMember::new().roles(Some(&[][..]));
            edit.reason = options.reason;
            self.edit(edit).await?;
            return Ok(self.resolved_roles());
        }

        let mut removed = Vec::new();
        for role in roles {
            if options.ignore_extra && !self.role_ids.contains(&role.id) {
                log::debug!("member {} doesn't have role {}, skipping", self.user.id, role.id);
                continue;
            }
            self.guild
                .rest()
                .remove_guild_member_role(self.guild.id, self.user.id, role.id, options.reason.as_deref())
                .await?;
            removed.push(role.clone());
        }
        Ok(removed)
    }

    /// Cached roles only; unresolved entries of `roles` are skipped.
    fn resolved_roles(&self) -> Vec<Role> {
        self.roles.iter().flatten().cloned().collect()
    }
}

fn resolve_roles(guild: &GuildRef, role_ids: &[Snowflake], user_id: Snowflake) -> Vec<Option<Role>> {
    let cache = guild.cache();
    role_ids
        .iter()
        .map(|id| {
            let role = cache.as_ref().and_then(|c| c.get_role(*id));
            if role.is_none() {
                log::warn!("role {} of member {} is not cached", id, user_id);
            }
            role
        })
        .collect()
}

impl Model for GuildMember {
    type Payload = MemberPayload;

    fn id(&self) -> Snowflake {
        self.user.id
    }

    fn apply(&mut self, payload: MemberPayload) {
        *self = Self::from_payload(payload, self.guild.clone());
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditMember {
    /// `Null` resets the nickname.
    #[serde(rename = "nick", skip_serializing_if = "Patch::is_unset")]
    pub nickname: Patch<String>,
    /// Replaces all roles. `Null` removes every role.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub roles: Patch<Vec<Snowflake>>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub mute: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub deaf: Patch<bool>,
    /// `Null` lifts the timeout.
    #[serde(rename = "communication_disabled_until", skip_serializing_if = "Patch::is_unset")]
    pub timeout_until: Patch<DateTime<Utc>>,
    #[serde(skip)]
    pub reason: Option<String>,
}

impl EditMember {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nickname(mut self, nickname: Option<String>) -> Self {
        self.nickname = Patch::from_option(nickname);
        self
    }
    pub fn roles(mut self, roles: Option<&[Role]>) -> Self {
        self.roles = Patch::from_option(roles.map(|r| r.iter().map(|role| role.id).collect()));
        self
    }
    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = Patch::Set(mute);
        self
    }
    pub fn deaf(mut self, deaf: bool) -> Self {
        self.deaf = Patch::Set(deaf);
        self
    }
    pub fn timeout_until(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.timeout_until = Patch::from_option(until);
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub(crate) fn into_body(mut self) -> Result<JsonBody, ClientError> {
        self.roles = self.roles.null_as(Vec::new());
        to_body(&self)
    }
}

/// Options for [`GuildMember::add_roles`].
#[derive(Debug, Clone)]
pub struct AddRoles {
    /// Replace the member's roles in a single edit.
    pub overwrite: bool,
    /// Skip roles the member already has.
    pub ignore_extra: bool,
    pub reason: Option<String>,
}

impl Default for AddRoles {
    fn default() -> Self {
        Self {
            overwrite: false,
            ignore_extra: true,
            reason: None,
        }
    }
}

impl AddRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
    pub fn ignore_extra(mut self, ignore_extra: bool) -> Self {
        self.ignore_extra = ignore_extra;
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Options for [`GuildMember::remove_roles`].
#[derive(Debug, Clone)]
pub struct RemoveRoles {
    /// Skip roles the member doesn't have.
    pub ignore_extra: bool,
    pub reason: Option<String>,
}

impl Default for RemoveRoles {
    fn default() -> Self {
        Self {
            ignore_extra: true,
            reason: None,
        }
    }
}

impl RemoveRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_extra(mut self, ignore_extra: bool) -> Self {
        self.ignore_extra = ignore_extra;
        self
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
