use actix_web::{
    get,
    web::{Data, Json},
};
use futures::future::join_all;
use log::debug;
use serde::Serialize;

use crate::{
    auth::AdminEx,
    cache::BotAdminCache,
    discord::{
        models::{PartialGuild, Sticker},
        DiscordApi,
    },
    error::{HResult, IntoHandlerErrorResult},
    store::InviteStore,
};

#[derive(Serialize)]
pub struct OwnedGuild {
    #[serde(flatten)]
    guild: PartialGuild,
    stickers: Vec<Sticker>,
    /// The bot could read the guild's stickers and there were some.
    bot_in_guild: bool,
    bot_is_admin: bool,
    stored_invite: Option<String>,
}

/// List Owned Guilds
///
/// Guilds the admin owns, each with its stickers as the bot sees them,
/// whether the bot has administrator there, and the stored invite code.
/// Guilds the bot can't see just come back without stickers.
#[utoipa::path(
    responses(
        (status = OK, description = "Owned guilds"),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Not the admin"),
        (status = INTERNAL_SERVER_ERROR, description = "The admin's guilds could not be listed")
    ),
    tag = "guilds",
    security(("session" = []))
)]
#[get("/api/guilds")]
pub async fn list_owned_guilds(
    admin: AdminEx,
    discord: Data<dyn DiscordApi>,
    bot_admin: Data<BotAdminCache>,
    invites: Data<InviteStore>,
) -> HResult<Json<Vec<OwnedGuild>>> {
    let guilds = discord
        .user_guilds(&admin.access_token)
        .await
        .or_err_msg(500, "Failed to fetch guilds")?;

    let owned = guilds.into_iter().filter(|guild| guild.owner).map(|guild| {
        let discord = &discord;
        let bot_admin = &bot_admin;
        let invites = &invites;

        async move {
            let stored_invite = invites.get(&guild.id).await;

            let (stickers, bot_is_admin) = match discord.guild_stickers(&guild.id).await {
                Ok(stickers) => {
                    let is_admin = bot_admin.is_admin(&guild.id).await;
                    (stickers, is_admin)
                }
                Err(e) => {
                    debug!("cannot fetch stickers for guild {}: {}", guild.id, e);
                    (Vec::new(), false)
                }
            };

            OwnedGuild {
                bot_in_guild: !stickers.is_empty(),
                guild,
                stickers,
                bot_is_admin,
                stored_invite,
            }
        }
    });

    Ok(Json(join_all(owned).await))
}
