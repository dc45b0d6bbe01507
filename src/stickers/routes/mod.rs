pub mod list_public_stickers;

use utoipa::OpenApi;

use crate::stickers::PublicSticker;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(list_public_stickers::list_public_stickers);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "stickers")
    ),
    paths(list_public_stickers::list_public_stickers),
    components(schemas(PublicSticker))
)]
pub struct StickersApiDocs;
