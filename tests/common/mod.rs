#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use actix_web::cookie::Cookie;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use nanoid::nanoid;
use tokio::sync::Notify;
use sticker_showcase::{
    app::{AppSettings, AppState},
    auth::session_manager::SESSION_COOKIE,
    clock::Clock,
    discord::{
        models::{
            Channel, CreateInvite, CurrentUserUpdate, Guild, GuildUpdate, Invite, Member,
            PartialGuild, Role, Sticker, StickerFormatType, TokenResponse, User, VanityUrl,
        },
        DiscordApi, DiscordError, DiscordResult,
    },
};

pub const CLIENT_ID: &str = "1000";
pub const ADMIN_ID: &str = "42";
pub const SIGNING_KEY: [u8; 32] = [7; 32];

pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// What the fake discord answers. Missing map entries behave like discord
/// does for guilds the bot can't see.
#[derive(Default)]
pub struct FakeState {
    pub users: HashMap<String, User>,
    pub bot: Option<User>,
    pub user_guilds: Vec<PartialGuild>,
    pub bot_guilds: Option<Vec<PartialGuild>>,
    pub stickers: HashMap<String, Vec<Sticker>>,
    pub vanity: HashMap<String, String>,
    pub invites: HashMap<String, Vec<Invite>>,
    pub channels: HashMap<String, Vec<Channel>>,
    pub members: HashMap<String, Member>,
    pub roles: HashMap<String, Vec<Role>>,
    pub modify_guild_error: Option<(u16, String)>,
    pub created_invites: Vec<(String, String)>,
    pub guild_updates: Vec<(String, GuildUpdate)>,
}

/// Holds the next `bot_guilds` call until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

pub struct FakeDiscord {
    bot_token: bool,
    state: Mutex<FakeState>,
    calls: Mutex<HashMap<&'static str, usize>>,
    bot_guilds_gate: Mutex<Option<Arc<Gate>>>,
}

impl FakeDiscord {
    pub fn new() -> Self {
        Self {
            bot_token: true,
            state: Mutex::new(FakeState {
                bot_guilds: Some(Vec::new()),
                ..FakeState::default()
            }),
            calls: Mutex::new(HashMap::new()),
            bot_guilds_gate: Mutex::new(None),
        }
    }

    pub fn gate_bot_guilds(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.bot_guilds_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn without_bot_token() -> Self {
        Self {
            bot_token: false,
            ..Self::new()
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().unwrap().entry(method).or_insert(0) += 1;
    }

    fn as_bot(&self, method: &'static str) -> DiscordResult<()> {
        self.record(method);
        if self.bot_token {
            Ok(())
        } else {
            Err(DiscordError::MissingBotToken)
        }
    }
}

pub fn api_error(status: u16, message: &str) -> DiscordError {
    DiscordError::Api {
        status,
        message: message.to_owned(),
    }
}

#[async_trait]
impl DiscordApi for FakeDiscord {
    fn has_bot_token(&self) -> bool {
        self.bot_token
    }

    async fn exchange_code(&self, code: &str, _redirect_uri: &str) -> DiscordResult<TokenResponse> {
        self.record("exchange_code");
        if code == "bad" {
            return Err(api_error(400, "invalid_grant"));
        }

        Ok(TokenResponse {
            access_token: format!("token-{}", code),
            token_type: Some("Bearer".into()),
            expires_in: Some(604800),
            refresh_token: None,
            scope: Some("identify guilds".into()),
        })
    }

    async fn current_user(&self, access_token: &str) -> DiscordResult<User> {
        self.record("current_user");
        self.state()
            .users
            .get(access_token)
            .cloned()
            .ok_or_else(|| api_error(401, "401: Unauthorized"))
    }

    async fn user_guilds(&self, _access_token: &str) -> DiscordResult<Vec<PartialGuild>> {
        self.record("user_guilds");
        Ok(self.state().user_guilds.clone())
    }

    async fn bot_user(&self) -> DiscordResult<User> {
        self.as_bot("bot_user")?;
        self.state()
            .bot
            .clone()
            .ok_or_else(|| api_error(401, "401: Unauthorized"))
    }

    async fn modify_bot_user(&self, update: &CurrentUserUpdate) -> DiscordResult<User> {
        self.as_bot("modify_bot_user")?;
        let mut state = self.state();
        let bot = state
            .bot
            .as_mut()
            .ok_or_else(|| api_error(401, "401: Unauthorized"))?;

        if let Some(username) = &update.username {
            bot.username = username.clone();
        }
        if let Some(avatar) = &update.avatar {
            bot.avatar = Some(avatar.clone());
        }

        Ok(bot.clone())
    }

    async fn bot_guilds(&self) -> DiscordResult<Vec<PartialGuild>> {
        self.as_bot("bot_guilds")?;

        let gate = self.bot_guilds_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.state()
            .bot_guilds
            .clone()
            .ok_or_else(|| api_error(502, "Bad Gateway"))
    }

    async fn guild_stickers(&self, guild_id: &str) -> DiscordResult<Vec<Sticker>> {
        self.as_bot("guild_stickers")?;
        self.state()
            .stickers
            .get(guild_id)
            .cloned()
            .ok_or_else(|| api_error(403, "Missing Access"))
    }

    async fn guild_vanity_url(&self, guild_id: &str) -> DiscordResult<VanityUrl> {
        self.as_bot("guild_vanity_url")?;
        match self.state().vanity.get(guild_id) {
            Some(code) => Ok(VanityUrl {
                code: Some(code.clone()),
                uses: Some(0),
            }),
            None => Err(api_error(403, "Missing Access")),
        }
    }

    async fn guild_invites(&self, guild_id: &str) -> DiscordResult<Vec<Invite>> {
        self.as_bot("guild_invites")?;
        self.state()
            .invites
            .get(guild_id)
            .cloned()
            .ok_or_else(|| api_error(403, "Missing Permissions"))
    }

    async fn guild_channels(&self, guild_id: &str) -> DiscordResult<Vec<Channel>> {
        self.as_bot("guild_channels")?;
        self.state()
            .channels
            .get(guild_id)
            .cloned()
            .ok_or_else(|| api_error(404, "Unknown Guild"))
    }

    async fn create_channel_invite(
        &self,
        channel_id: &str,
        invite: &CreateInvite,
    ) -> DiscordResult<Invite> {
        self.as_bot("create_channel_invite")?;
        let code = format!("new-{}", channel_id);
        self.state()
            .created_invites
            .push((channel_id.to_owned(), code.clone()));

        Ok(Invite {
            code,
            max_age: Some(invite.max_age),
            max_uses: Some(invite.max_uses),
            uses: Some(0),
            temporary: Some(invite.temporary),
        })
    }

    async fn modify_guild(&self, guild_id: &str, update: &GuildUpdate) -> DiscordResult<Guild> {
        self.as_bot("modify_guild")?;
        let mut state = self.state();
        if let Some((status, message)) = &state.modify_guild_error {
            return Err(api_error(*status, message));
        }

        state
            .guild_updates
            .push((guild_id.to_owned(), update.clone()));

        Ok(Guild {
            id: guild_id.to_owned(),
            name: update.name.clone().unwrap_or_else(|| "Unchanged".into()),
            icon: update.icon.as_ref().map(|_| "newiconhash".into()),
            owner_id: Some(ADMIN_ID.into()),
            vanity_url_code: None,
            features: Vec::new(),
            approximate_member_count: None,
        })
    }

    async fn guild_member(&self, guild_id: &str, _user_id: &str) -> DiscordResult<Member> {
        self.as_bot("guild_member")?;
        self.state()
            .members
            .get(guild_id)
            .cloned()
            .ok_or_else(|| api_error(404, "Unknown Member"))
    }

    async fn guild_roles(&self, guild_id: &str) -> DiscordResult<Vec<Role>> {
        self.as_bot("guild_roles")?;
        self.state()
            .roles
            .get(guild_id)
            .cloned()
            .ok_or_else(|| api_error(404, "Unknown Guild"))
    }
}

pub fn user(id: &str, username: &str) -> User {
    User {
        id: id.into(),
        username: username.into(),
        global_name: None,
        discriminator: Some("0".into()),
        avatar: None,
    }
}

pub fn guild(id: &str, name: &str, owner: bool) -> PartialGuild {
    PartialGuild {
        id: id.into(),
        name: name.into(),
        icon: Some(format!("icon-{}", id)),
        owner,
        permissions: None,
        features: Vec::new(),
        approximate_member_count: None,
    }
}

pub fn sticker(id: &str, name: &str) -> Sticker {
    Sticker {
        id: id.into(),
        name: name.into(),
        description: Some(format!("{} sticker", name)),
        format_type: StickerFormatType::Png,
        guild_id: None,
        tags: Some("smile".into()),
        available: Some(true),
    }
}

pub fn invite(code: &str, max_age: u32) -> Invite {
    Invite {
        code: code.into(),
        max_age: Some(max_age),
        max_uses: Some(0),
        uses: Some(3),
        temporary: Some(false),
    }
}

pub fn channel(id: &str, kind: u8) -> Channel {
    Channel {
        id: id.into(),
        kind,
        name: Some(format!("channel-{}", id)),
        position: Some(0),
    }
}

pub fn role(id: &str, permissions: &str) -> Role {
    Role {
        id: id.into(),
        name: format!("role-{}", id),
        permissions: permissions.into(),
        position: Some(1),
    }
}

pub fn member(roles: &[&str]) -> Member {
    Member {
        user: None,
        nick: None,
        roles: roles.iter().map(|role| role.to_string()).collect(),
    }
}

/// Fresh, empty directory under the system temp dir.
pub fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sticker-showcase-test-{}", nanoid!(10)));
    std::fs::create_dir_all(dir.join("public").join("admin")).unwrap();
    dir
}

pub struct TestEnv {
    pub discord: Arc<FakeDiscord>,
    pub clock: Arc<ManualClock>,
    pub state: AppState,
    pub dir: PathBuf,
}

impl TestEnv {
    /// Admin pinned to [`ADMIN_ID`].
    pub async fn new(discord: FakeDiscord) -> Self {
        Self::build(discord, Some(ADMIN_ID.into())).await
    }

    /// Nobody has logged in yet.
    pub async fn unconfigured(discord: FakeDiscord) -> Self {
        Self::build(discord, None).await
    }

    async fn build(discord: FakeDiscord, pinned_admin: Option<String>) -> Self {
        let dir = temp_dir();
        let discord = Arc::new(discord);
        let clock = Arc::new(ManualClock::new());

        let settings = AppSettings {
            client_id: CLIENT_ID.into(),
            redirect_base: "http://localhost:3000/".into(),
            signing_key: SIGNING_KEY,
            secure_cookies: false,
            pinned_admin,
            invites_file: dir.join("data").join("invites.json"),
            config_file: dir.join("data").join("config.json"),
            public_path: dir.join("public"),
        };

        let state = AppState::build(discord.clone(), clock.clone(), &settings).await;

        Self {
            discord,
            clock,
            state,
            dir,
        }
    }

    /// Cookie of a fresh session for `user`, who `current_user` will also
    /// answer for.
    pub fn login(&self, user: User) -> Cookie<'static> {
        let token = format!("token-{}", user.id);
        self.discord.state().users.insert(token.clone(), user.clone());
        Cookie::new(SESSION_COOKIE, self.state.sessions.create(&user, token))
    }

    pub fn admin_cookie(&self) -> Cookie<'static> {
        self.login(user(ADMIN_ID, "admin"))
    }
}

/// Hand-built multipart/form-data body.
pub struct MultipartBody {
    body: Vec<u8>,
}

const BOUNDARY: &str = "----stickershowcaseboundary";

impl MultipartBody {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, filename, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// `(content type header, body)`
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        (
            format!("multipart/form-data; boundary={}", BOUNDARY),
            self.body,
        )
    }
}
