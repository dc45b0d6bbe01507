use actix_web::{
    post,
    web::{Data, Json, Path},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::AdminEx,
    cache::PublicStickerCache,
    error::{HResult, HandlerError},
    invites::{CreateInviteError, InviteResolver},
};

#[derive(Serialize, ToSchema)]
pub struct CreateInviteResponse {
    success: bool,
    #[schema(example = "abc")]
    invite_code: String,
    #[schema(value_type = String, example = "Invite created successfully")]
    message: &'static str,
}

/// Create an invite code
///
/// Makes sure the guild has an invite the public listing can link to. A
/// stored invite, the vanity url or an existing permanent invite is reused
/// if there is one; otherwise a permanent, unlimited invite is created on
/// the first text channel (or the first channel, if there are no text
/// channels).
#[utoipa::path(
    params(
        ("guild_id" = String, Path, description = "Guild id", example = "81384788765712384")
    ),
    responses(
        (status = OK, description = "Invite found or created", body = CreateInviteResponse),
        (status = BAD_REQUEST, description = "The guild has no channels"),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Not the admin")
    ),
    tag = "invites",
    security(("session" = []))
)]
#[post("/api/guilds/{guild_id}/create-invite")]
pub async fn create_invite(
    _admin: AdminEx,
    guild_id: Path<String>,
    resolver: Data<InviteResolver>,
    stickers: Data<PublicStickerCache>,
) -> HResult<Json<CreateInviteResponse>> {
    let invite = resolver.create(&guild_id).await.map_err(|e| match e {
        CreateInviteError::NoChannel => HandlerError::from((400, "No suitable channel found")),
        CreateInviteError::Upstream(e) => HandlerError::from_upstream(&e, "Failed to create invite"),
    })?;

    stickers.invalidate();

    Ok(Json(CreateInviteResponse {
        success: true,
        invite_code: invite.code,
        message: invite.source.describe(),
    }))
}
