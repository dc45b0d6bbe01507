use actix_web::{get, web::Data, HttpRequest, HttpResponse};
use log::error;

use crate::{
    error::{macros::err, HResult},
    site::{render::render_index, SiteFiles},
    store::ConfigStore,
};

/// Public Page
///
/// The sticker showcase, with its link preview meta tags filled from the
/// current Open Graph config.
#[utoipa::path(
    responses(
        (status = OK, description = "Rendered index page", content_type = "text/html"),
        (status = NOT_FOUND, description = "The public index page is missing")
    ),
    tag = "site"
)]
#[get("/")]
pub async fn index(
    req: HttpRequest,
    files: Data<SiteFiles>,
    config: Data<ConfigStore>,
) -> HResult<HttpResponse> {
    let html = match tokio::fs::read_to_string(files.index_page()).await {
        Ok(html) => html,
        Err(e) => {
            error!("cannot read {}: {}", files.index_page().display(), e);
            return err!(404);
        }
    };

    let og = config.og_config();
    let site_url = if og.url.is_empty() {
        let info = req.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    } else {
        og.url.clone()
    };

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_index(&html, &og, &site_url)))
}
