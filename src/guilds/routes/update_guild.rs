use actix_multipart::Multipart;
use actix_web::{
    patch,
    web::{Data, Json},
};
use log::info;
use serde::Serialize;

use crate::{
    auth::AdminEx,
    cache::PublicStickerCache,
    discord::{
        models::{Guild, GuildUpdate},
        DiscordApi,
    },
    error::{macros::err, HResult, HandlerError},
    guilds::routes::GuildPath,
    media::read_image_form,
};

#[derive(Serialize)]
pub struct UpdateGuildResponse {
    success: bool,
    guild: Guild,
    message: &'static str,
}

/// Update Guild
///
/// Renames the guild and/or replaces its icon, as the bot. Takes a multipart
/// form with a `name` text field and an `icon` image (at most 10 MB); at
/// least one of them must be given.
#[utoipa::path(
    params(super::GuildIdParams),
    request_body(content = String, content_type = "multipart/form-data", description = "`name` and/or `icon`"),
    responses(
        (status = OK, description = "Guild updated"),
        (status = BAD_REQUEST, description = "No updates provided, or the icon is not an image"),
        (status = PAYLOAD_TOO_LARGE, description = "Icon larger than 10 MB"),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Not the admin")
    ),
    tag = "guilds",
    security(("session" = []))
)]
#[patch("/api/guilds/{guild_id}")]
pub async fn update_guild(
    _admin: AdminEx,
    path: GuildPath,
    payload: Multipart,
    discord: Data<dyn DiscordApi>,
    stickers: Data<PublicStickerCache>,
) -> HResult<Json<UpdateGuildResponse>> {
    let mut form = read_image_form(payload).await?;

    let update = GuildUpdate {
        name: form.trimmed("name"),
        icon: form.take_image("icon").map(|icon| icon.data_uri()),
    };

    if update.is_empty() {
        return err!(400, "No updates provided");
    }

    let guild = discord
        .modify_guild(&path.guild_id, &update)
        .await
        .map_err(|e| HandlerError::from_upstream(&e, "Failed to update guild"))?;

    info!("updated guild {} ({})", guild.name, guild.id);
    stickers.invalidate();

    Ok(Json(UpdateGuildResponse {
        success: true,
        guild,
        message: "Guild updated successfully",
    }))
}
