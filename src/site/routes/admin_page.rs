use actix_files::NamedFile;
use actix_web::{get, web::Data};

use crate::{
    error::{HResult, IntoHandlerErrorResult},
    site::SiteFiles,
};

/// Admin Page
///
/// The admin panel itself is public, it asks `/api/check-auth` who is looking.
#[utoipa::path(
    responses(
        (status = OK, description = "Admin page", content_type = "text/html"),
        (status = NOT_FOUND, description = "The admin page is missing")
    ),
    tag = "site"
)]
#[get("/admin")]
pub async fn admin_page(files: Data<SiteFiles>) -> HResult<NamedFile> {
    NamedFile::open_async(files.admin_page()).await.or_err(404)
}
