use actix_web::{
    get,
    web::{Data, Json},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::OAuthConfig,
    discord::{bot_authorize_url, Permissions},
};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BotInviteUrl {
    #[schema(example = "https://discord.com/oauth2/authorize?client_id=123&permissions=0&scope=bot")]
    invite_url: String,
}

/// Bot Invite Url
///
/// Adds the bot to a guild without any permissions, which is enough for it
/// to read the guild's stickers.
#[utoipa::path(
    responses(
        (status = OK, description = "Install url", body = BotInviteUrl)
    ),
    tag = "bot"
)]
#[get("/api/bot-invite-url")]
pub async fn bot_invite_url(oauth: Data<OAuthConfig>) -> Json<BotInviteUrl> {
    Json(BotInviteUrl {
        invite_url: bot_authorize_url(&oauth.client_id, Permissions::NONE, None),
    })
}
