use std::sync::Arc;

use actix_web::{
    get,
    web::{Data, Json},
};

use crate::{
    cache::PublicStickerCache,
    error::{HResult, IntoHandlerErrorResult},
    stickers::PublicSticker,
};

/// List Public Stickers
///
/// Every sticker of every guild the bot is in, each with an invite code to
/// join its guild. Served from a cache that is at most five minutes old, and
/// refreshed right away when the admin changes a guild.
#[utoipa::path(
    responses(
        (status = OK, description = "Sticker list", body = Vec<PublicSticker>),
        (status = INTERNAL_SERVER_ERROR, description = "The bot's guilds could not be listed")
    ),
    tag = "stickers"
)]
#[get("/api/public/stickers")]
pub async fn list_public_stickers(
    cache: Data<PublicStickerCache>,
) -> HResult<Json<Arc<Vec<PublicSticker>>>> {
    let stickers = cache.get().await.or_err_msg(500, "Failed to fetch stickers")?;
    Ok(Json(stickers))
}
