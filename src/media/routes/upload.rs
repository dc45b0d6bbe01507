use actix_multipart::Multipart;
use actix_web::{
    post,
    web::{Data, Json},
};
use chrono::Utc;
use log::{info, warn};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::AdminEx,
    error::{macros::err, HResult, IntoHandlerErrorResult},
    media::read_image_form,
    site::SiteFiles,
};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImageUrl {
    success: bool,
    #[schema(example = "/uploads/og-preview-1714000000000.png")]
    image_url: String,
}

/// Upload Preview Image
///
/// Stores an image for use as the Open Graph preview. The returned url can be
/// put into the `image` field of the og config.
#[utoipa::path(
    request_body(content = String, content_type = "multipart/form-data", description = "`image` file field, at most 10 MB"),
    responses(
        (status = OK, description = "Image stored", body = UploadedImageUrl),
        (status = BAD_REQUEST, description = "No image, or not an image"),
        (status = PAYLOAD_TOO_LARGE, description = "Image larger than 10 MB"),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Not the admin")
    ),
    tag = "media",
    security(("session" = []))
)]
#[post("/api/og-upload-image")]
pub async fn upload_og_image(
    _admin: AdminEx,
    files: Data<SiteFiles>,
    payload: Multipart,
) -> HResult<Json<UploadedImageUrl>> {
    let mut form = read_image_form(payload).await?;
    let image = form.take_image("image").or_err_msg(400, "No image provided")?;

    let filename = format!("og-preview-{}{}", Utc::now().timestamp_millis(), image.extension());
    let dir = files.uploads();

    tokio::fs::create_dir_all(&dir)
        .await
        .or_err_msg(500, "Failed to upload image")?;

    if let Err(e) = tokio::fs::write(dir.join(&filename), &image.bytes).await {
        warn!("saving preview image `{}` failed: {}", filename, e);
        return err!(500, "Failed to upload image");
    }

    info!("stored preview image `{}` ({} bytes)", filename, image.bytes.len());

    Ok(Json(UploadedImageUrl {
        success: true,
        image_url: format!("/uploads/{}", filename),
    }))
}
