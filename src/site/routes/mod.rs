use utoipa::OpenApi;

pub mod admin_page;
pub mod index;
pub mod og_config;

use og_config::OgConfigUpdated;

use crate::store::OgConfig;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(index::index);
    cfg.service(admin_page::admin_page);
    cfg.service(og_config::get_og_config);
    cfg.service(og_config::update_og_config);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "site")
    ),
    paths(
        index::index,
        admin_page::admin_page,
        og_config::get_og_config,
        og_config::update_og_config,
    ),
    components(schemas(OgConfig, OgConfigUpdated))
)]
pub struct SiteApiDocs;
