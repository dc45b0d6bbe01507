use actix_web::{get, web::{Data, Json}};

use crate::{
    auth::AdminEx,
    discord::{models::User, DiscordApi},
    error::{HResult, IntoHandlerErrorResult},
};

/// Current User
///
/// The admin's own discord profile, fetched with their OAuth token.
#[utoipa::path(
    responses(
        (status = OK, description = "Discord user"),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Logged in as someone other than the admin")
    ),
    tag = "auth",
    security(("session" = []))
)]
#[get("/api/user")]
pub async fn user(admin: AdminEx, discord: Data<dyn DiscordApi>) -> HResult<Json<User>> {
    let user = discord
        .current_user(&admin.access_token)
        .await
        .or_err_msg(500, "Failed to fetch user")?;

    Ok(Json(user))
}
