pub mod bot_admin_url;
pub mod bot_invite_url;
pub mod bot_profile;

use utoipa::OpenApi;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(bot_invite_url::bot_invite_url)
        .service(bot_admin_url::bot_admin_url)
        .service(bot_admin_url::bot_admin_url_for_guild)
        .service(bot_profile::get_bot_profile)
        .service(bot_profile::update_bot_profile);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "bot", description = "Installing and managing the bot")
    ),
    paths(
        bot_invite_url::bot_invite_url,
        bot_admin_url::bot_admin_url,
        bot_admin_url::bot_admin_url_for_guild,
        bot_profile::get_bot_profile,
        bot_profile::update_bot_profile,
    ),
    components(schemas(
        bot_invite_url::BotInviteUrl,
        bot_admin_url::BotAdminUrl,
    ))
)]
pub struct BotsApiDoc;
