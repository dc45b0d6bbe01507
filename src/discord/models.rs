use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::Permissions;

pub type Snowflake = String;

/// Channel type of a guild text channel.
pub const GUILD_TEXT: u8 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Guild as returned by `/users/@me/guilds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialGuild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether the requesting user owns the guild.
    #[serde(default)]
    pub owner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u64>,
}

/// Guild as returned by `PATCH /guilds/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
    #[serde(default)]
    pub vanity_url_code: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum StickerFormatType {
    Png = 1,
    Apng = 2,
    Lottie = 3,
    Gif = 4,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sticker {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub format_type: StickerFormatType,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VanityUrl {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub uses: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub code: String,
    /// Seconds until expiry, 0 means never.
    #[serde(default)]
    pub max_age: Option<u32>,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub uses: Option<u32>,
    #[serde(default)]
    pub temporary: Option<bool>,
}

impl Invite {
    pub fn is_permanent(&self) -> bool {
        self.max_age == Some(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    /// Kept as the raw string, a malformed value should only disqualify this
    /// one role rather than the whole role list.
    pub permissions: String,
    #[serde(default)]
    pub position: Option<i32>,
}

impl Role {
    pub fn permissions(&self) -> Option<Permissions> {
        self.permissions.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    // Do not forward the refresh token plainly to the client.
    #[serde(default, skip_serializing)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateInvite {
    pub max_age: u32,
    pub max_uses: u32,
    pub unique: bool,
    pub temporary: bool,
}

impl CreateInvite {
    /// Never expires, unlimited uses.
    pub fn permanent() -> Self {
        Self {
            max_age: 0,
            max_uses: 0,
            unique: false,
            temporary: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GuildUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Image data uri.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl GuildUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.icon.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CurrentUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Image data uri.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl CurrentUserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar.is_none()
    }
}
