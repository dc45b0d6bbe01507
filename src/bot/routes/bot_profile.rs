use actix_multipart::Multipart;
use actix_web::{
    get, patch,
    web::{Data, Json},
};
use log::info;

use crate::{
    auth::AdminEx,
    discord::{
        models::{CurrentUserUpdate, User},
        DiscordApi,
    },
    error::{macros::err, HResult, HandlerError},
    media::read_image_form,
};

/// Bot Profile
///
/// The bot's own user record.
#[utoipa::path(
    responses(
        (status = OK, description = "Bot user"),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Not the admin"),
        (status = SERVICE_UNAVAILABLE, description = "No bot token configured")
    ),
    tag = "bot",
    security(("session" = []))
)]
#[get("/api/bot-profile")]
pub async fn get_bot_profile(_admin: AdminEx, discord: Data<dyn DiscordApi>) -> HResult<Json<User>> {
    let user = discord
        .bot_user()
        .await
        .map_err(|e| HandlerError::from_upstream(&e, "Failed to fetch bot profile"))?;

    Ok(Json(user))
}

/// Update Bot Profile
///
/// Changes the bot's username and/or avatar. Multipart form with a
/// `username` text field and an `avatar` image (at most 10 MB).
#[utoipa::path(
    request_body(content = String, content_type = "multipart/form-data", description = "`username` and/or `avatar`"),
    responses(
        (status = OK, description = "Updated bot user"),
        (status = BAD_REQUEST, description = "No updates provided, or the avatar is not an image"),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Not the admin")
    ),
    tag = "bot",
    security(("session" = []))
)]
#[patch("/api/bot-profile")]
pub async fn update_bot_profile(
    _admin: AdminEx,
    payload: Multipart,
    discord: Data<dyn DiscordApi>,
) -> HResult<Json<User>> {
    let mut form = read_image_form(payload).await?;

    let update = CurrentUserUpdate {
        username: form.trimmed("username"),
        avatar: form.take_image("avatar").map(|avatar| avatar.data_uri()),
    };

    if update.is_empty() {
        return err!(400, "No updates provided");
    }

    let user = discord
        .modify_bot_user(&update)
        .await
        .map_err(|e| HandlerError::from_upstream(&e, "Failed to update bot profile"))?;

    info!("bot profile updated, now {}", user.username);

    Ok(Json(user))
}
