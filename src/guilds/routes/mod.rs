use actix_web::web::Path;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

pub mod list_owned_guilds;
pub mod update_guild;

#[derive(Deserialize, IntoParams)]
pub struct GuildIdParams {
    #[param(example = "81384788765712384")]
    pub guild_id: String,
}

pub type GuildPath = Path<GuildIdParams>;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(list_owned_guilds::list_owned_guilds)
        .service(update_guild::update_guild);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "guilds")
    ),
    paths(
        list_owned_guilds::list_owned_guilds,
        update_guild::update_guild,
    )
)]
pub struct GuildsApiDocs;
