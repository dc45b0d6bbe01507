use actix_web::{
    get,
    web::{Data, Json, Path},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::OAuthConfig,
    discord::{bot_authorize_url, Permissions},
};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BotAdminUrl {
    invite_url: String,
    #[schema(value_type = String, example = "Administrator")]
    permissions: &'static str,
}

fn admin_url(client_id: &str, guild_id: Option<&str>) -> Json<BotAdminUrl> {
    Json(BotAdminUrl {
        invite_url: bot_authorize_url(client_id, Permissions::ADMINISTRATOR, guild_id),
        permissions: "Administrator",
    })
}

/// Bot Administrator Url
///
/// Installs the bot (or re-authorizes it) with the administrator permission,
/// letting the admin pick the guild.
#[utoipa::path(
    responses(
        (status = OK, description = "Install url", body = BotAdminUrl)
    ),
    tag = "bot"
)]
#[get("/api/bot-admin-url")]
pub async fn bot_admin_url(oauth: Data<OAuthConfig>) -> Json<BotAdminUrl> {
    admin_url(&oauth.client_id, None)
}

/// Bot Administrator Url For Guild
///
/// Same as the plain variant, but with the guild preselected and locked.
#[utoipa::path(
    params(
        ("guild_id" = String, Path, description = "Guild id", example = "81384788765712384")
    ),
    responses(
        (status = OK, description = "Install url", body = BotAdminUrl)
    ),
    tag = "bot"
)]
#[get("/api/bot-admin-url/{guild_id}")]
pub async fn bot_admin_url_for_guild(
    oauth: Data<OAuthConfig>,
    guild_id: Path<String>,
) -> Json<BotAdminUrl> {
    admin_url(&oauth.client_id, Some(guild_id.as_str()))
}
