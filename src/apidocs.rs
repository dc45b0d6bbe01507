use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    OpenApi,
};

use crate::{
    auth::{routes::AuthApiDocs, session_manager::SESSION_COOKIE},
    bot::routes::BotsApiDoc,
    guilds::routes::GuildsApiDocs,
    invites::routes::InvitesApiDoc,
    media::routes::MediaApiDocs,
    site::routes::SiteApiDocs,
    stickers::routes::StickersApiDocs,
};

/// Where the generated document is served, the viewer lives at `/api/docs`.
pub const OPENAPI_JSON: &str = "/api/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Sticker Showcase"),
    modifiers(&SessionSecurityAddon)
)]
pub struct ApiDocs;

pub fn setup_oapi() -> utoipa::openapi::OpenApi {
    let mut oapi = ApiDocs::openapi();

    oapi.merge(AuthApiDocs::openapi());
    oapi.merge(StickersApiDocs::openapi());
    oapi.merge(GuildsApiDocs::openapi());
    oapi.merge(InvitesApiDoc::openapi());
    oapi.merge(BotsApiDoc::openapi());
    oapi.merge(SiteApiDocs::openapi());
    oapi.merge(MediaApiDocs::openapi());

    oapi
}

struct SessionSecurityAddon;

impl utoipa::Modify for SessionSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.components = Some(
            utoipa::openapi::ComponentsBuilder::new()
                .security_scheme(
                    "session",
                    SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
                )
                .build(),
        )
    }
}
