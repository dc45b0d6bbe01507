use utoipa::OpenApi;

pub mod upload;

use upload::UploadedImageUrl;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(upload::upload_og_image);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "media")
    ),
    paths(upload::upload_og_image),
    components(schemas(UploadedImageUrl))
)]
pub struct MediaApiDocs;
