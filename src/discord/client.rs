use async_trait::async_trait;
use log::debug;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::{
    error::ErrorBody,
    models::{
        Channel, CreateInvite, CurrentUserUpdate, Guild, GuildUpdate, Invite, Member,
        PartialGuild, Role, Sticker, TokenResponse, User, VanityUrl,
    },
    DiscordApi, DiscordError, DiscordResult,
};

#[derive(Serialize)]
struct DiscordTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
    grant_type: &'a str,
}

enum Credential<'a> {
    Bot,
    Bearer(&'a str),
}

/// [`DiscordApi`] over the real rest api. Every method is exactly one request.
pub struct DiscordClient {
    http: reqwest::Client,
    api_url: String,
    client_id: String,
    client_secret: String,
    bot_token: Option<String>,
}

impl DiscordClient {
    pub fn new(
        api_url: &str,
        client_id: &str,
        client_secret: &str,
        bot_token: Option<String>,
    ) -> Self {
        let http = reqwest::ClientBuilder::new()
            .use_rustls_tls()
            .user_agent(concat!(
                "DiscordBot (",
                env!("CARGO_PKG_NAME"),
                ", ",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .build()
            .expect("failed to build http client");

        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_owned(),
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            bot_token,
        }
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Credential,
    ) -> DiscordResult<RequestBuilder> {
        let authorization = match credential {
            Credential::Bot => {
                let token = self
                    .bot_token
                    .as_ref()
                    .ok_or(DiscordError::MissingBotToken)?;
                format!("Bot {}", token)
            }
            Credential::Bearer(token) => format!("Bearer {}", token),
        };

        debug!("discord: {} {}", method, path);

        Ok(self
            .http
            .request(method, format!("{}{}", self.api_url, path))
            .header("Authorization", authorization))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> DiscordResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(api_error(status, &body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, credential: Credential<'_>) -> DiscordResult<T> {
        Self::send(self.request(Method::GET, path, credential)?).await
    }
}

fn api_error(status: StatusCode, body: &[u8]) -> DiscordError {
    let body = serde_json::from_slice::<ErrorBody>(body).ok();

    if let Some(code) = body.as_ref().and_then(|body| body.code) {
        debug!("discord error code {} ({})", code, status);
    }

    let message = body
        .and_then(|body| body.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_owned());

    DiscordError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl DiscordApi for DiscordClient {
    fn has_bot_token(&self) -> bool {
        self.bot_token.is_some()
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> DiscordResult<TokenResponse> {
        let request = self
            .http
            .post(format!("{}/oauth2/token", self.api_url))
            .header("Accept", "application/json")
            .form(&DiscordTokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                redirect_uri,
                code,
                grant_type: "authorization_code",
            });

        Self::send(request).await
    }

    async fn current_user(&self, access_token: &str) -> DiscordResult<User> {
        self.get("/users/@me", Credential::Bearer(access_token)).await
    }

    async fn user_guilds(&self, access_token: &str) -> DiscordResult<Vec<PartialGuild>> {
        self.get("/users/@me/guilds", Credential::Bearer(access_token))
            .await
    }

    async fn bot_user(&self) -> DiscordResult<User> {
        self.get("/users/@me", Credential::Bot).await
    }

    async fn modify_bot_user(&self, update: &CurrentUserUpdate) -> DiscordResult<User> {
        let request = self
            .request(Method::PATCH, "/users/@me", Credential::Bot)?
            .json(update);
        Self::send(request).await
    }

    async fn bot_guilds(&self) -> DiscordResult<Vec<PartialGuild>> {
        self.get("/users/@me/guilds", Credential::Bot).await
    }

    async fn guild_stickers(&self, guild_id: &str) -> DiscordResult<Vec<Sticker>> {
        self.get(&format!("/guilds/{}/stickers", guild_id), Credential::Bot)
            .await
    }

    async fn guild_vanity_url(&self, guild_id: &str) -> DiscordResult<VanityUrl> {
        self.get(&format!("/guilds/{}/vanity-url", guild_id), Credential::Bot)
            .await
    }

    async fn guild_invites(&self, guild_id: &str) -> DiscordResult<Vec<Invite>> {
        self.get(&format!("/guilds/{}/invites", guild_id), Credential::Bot)
            .await
    }

    async fn guild_channels(&self, guild_id: &str) -> DiscordResult<Vec<Channel>> {
        self.get(&format!("/guilds/{}/channels", guild_id), Credential::Bot)
            .await
    }

    async fn create_channel_invite(
        &self,
        channel_id: &str,
        invite: &CreateInvite,
    ) -> DiscordResult<Invite> {
        let request = self
            .request(
                Method::POST,
                &format!("/channels/{}/invites", channel_id),
                Credential::Bot,
            )?
            .json(invite);
        Self::send(request).await
    }

    async fn modify_guild(&self, guild_id: &str, update: &GuildUpdate) -> DiscordResult<Guild> {
        let request = self
            .request(Method::PATCH, &format!("/guilds/{}", guild_id), Credential::Bot)?
            .json(update);
        Self::send(request).await
    }

    async fn guild_member(&self, guild_id: &str, user_id: &str) -> DiscordResult<Member> {
        self.get(
            &format!("/guilds/{}/members/{}", guild_id, user_id),
            Credential::Bot,
        )
        .await
    }

    async fn guild_roles(&self, guild_id: &str) -> DiscordResult<Vec<Role>> {
        self.get(&format!("/guilds/{}/roles", guild_id), Credential::Bot)
            .await
    }
}
