pub mod client;
pub mod error;
pub mod models;
pub mod permissions;

use async_trait::async_trait;

use models::{
    Channel, CreateInvite, CurrentUserUpdate, Guild, GuildUpdate, Invite, Member, PartialGuild,
    Role, Sticker, TokenResponse, User, VanityUrl,
};

// re-export
pub use client::DiscordClient;
pub use error::{DiscordError, DiscordResult};
pub use permissions::Permissions;

pub const DISCORD_API: &str = "https://discord.com/api/v10";
pub const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";

/// Scopes requested from the admin during login.
pub const OAUTH_SCOPES: &str = "identify guilds";

/// The discord rest calls this server makes.
///
/// Methods taking an `access_token` act as the logged in user (OAuth bearer
/// token), everything else acts as the bot and fails with
/// [`DiscordError::MissingBotToken`] when no bot token is configured.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    fn has_bot_token(&self) -> bool;

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> DiscordResult<TokenResponse>;

    async fn current_user(&self, access_token: &str) -> DiscordResult<User>;

    async fn user_guilds(&self, access_token: &str) -> DiscordResult<Vec<PartialGuild>>;

    async fn bot_user(&self) -> DiscordResult<User>;

    async fn modify_bot_user(&self, update: &CurrentUserUpdate) -> DiscordResult<User>;

    async fn bot_guilds(&self) -> DiscordResult<Vec<PartialGuild>>;

    async fn guild_stickers(&self, guild_id: &str) -> DiscordResult<Vec<Sticker>>;

    async fn guild_vanity_url(&self, guild_id: &str) -> DiscordResult<VanityUrl>;

    async fn guild_invites(&self, guild_id: &str) -> DiscordResult<Vec<Invite>>;

    async fn guild_channels(&self, guild_id: &str) -> DiscordResult<Vec<Channel>>;

    async fn create_channel_invite(
        &self,
        channel_id: &str,
        invite: &CreateInvite,
    ) -> DiscordResult<Invite>;

    async fn modify_guild(&self, guild_id: &str, update: &GuildUpdate) -> DiscordResult<Guild>;

    async fn guild_member(&self, guild_id: &str, user_id: &str) -> DiscordResult<Member>;

    async fn guild_roles(&self, guild_id: &str) -> DiscordResult<Vec<Role>>;
}

/// Url that installs the bot with the given permissions, optionally locked to
/// one guild.
pub fn bot_authorize_url(client_id: &str, permissions: Permissions, guild_id: Option<&str>) -> String {
    let permissions = permissions.to_string();
    let mut params = vec![
        ("client_id", client_id),
        ("permissions", permissions.as_str()),
        ("scope", "bot"),
    ];

    if let Some(guild_id) = guild_id {
        params.push(("guild_id", guild_id));
        params.push(("disable_guild_select", "true"));
    }

    let query = serde_urlencoded::to_string(&params).unwrap_or_default();

    format!("{}?{}", DISCORD_AUTHORIZE_URL, query)
}

/// Url the admin is sent to for logging in.
pub fn login_authorize_url(client_id: &str, redirect_uri: &str, state: &str) -> String {
    let query = serde_urlencoded::to_string([
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", OAUTH_SCOPES),
        ("state", state),
    ])
    .unwrap_or_default();

    format!("{}?{}", DISCORD_AUTHORIZE_URL, query)
}
