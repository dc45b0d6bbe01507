use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;
use mime::Mime;

use crate::error::{macros::err, HResult, IntoHandlerErrorResult};

pub mod routes;

/// Uploaded images and plain form fields are both capped at this size.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub mime: Mime,
    pub filename: String,
}

impl UploadedImage {
    /// `data:<mime>;base64,<bytes>`, the form discord takes icons and avatars in.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime.essence_str(),
            base64::encode(&self.bytes)
        )
    }

    /// Extension of the uploaded filename including the dot, e.g. `.png`.
    /// Empty if the filename has none or it isn't plain ascii.
    pub fn extension(&self) -> String {
        match self.filename.rsplit_once('.') {
            Some((name, ext))
                if !name.is_empty()
                    && !ext.is_empty()
                    && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                format!(".{}", ext.to_ascii_lowercase())
            }
            _ => String::new(),
        }
    }
}

/// A multipart body split into text fields and image files.
#[derive(Debug, Default)]
pub struct ImageForm {
    pub text: HashMap<String, String>,
    pub images: HashMap<String, UploadedImage>,
}

impl ImageForm {
    /// Text field with surrounding whitespace removed, `None` if missing or blank.
    pub fn trimmed(&self, name: &str) -> Option<String> {
        self.text
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }

    pub fn take_image(&mut self, name: &str) -> Option<UploadedImage> {
        self.images.remove(name)
    }
}

/// Reads the whole multipart payload. File parts must be `image/*` and at
/// most [`MAX_IMAGE_SIZE`] bytes; file inputs left empty are skipped.
pub async fn read_image_form(mut payload: Multipart) -> HResult<ImageForm> {
    let mut form = ImageForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .or_err_msg(400, "Malformed multipart body")?
    {
        let disposition = field.content_disposition();
        let name = match disposition.get_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };
        let filename = disposition.get_filename().map(str::to_owned);
        let mime = field.content_type().cloned();

        let bytes = read_field(&mut field).await?;

        match filename {
            // not a file part
            None => {
                let value = String::from_utf8(bytes).or_err_msg(400, "Invalid form field")?;
                form.text.insert(name, value);
            }
            Some(filename) if filename.is_empty() || bytes.is_empty() => continue,
            Some(filename) => {
                let mime = match mime {
                    Some(mime) if mime.type_() == mime::IMAGE => mime,
                    _ => return err!(400, "Only image files are allowed"),
                };

                form.images.insert(name, UploadedImage { bytes, mime, filename });
            }
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field) -> HResult<Vec<u8>> {
    let mut bytes = Vec::new();

    while let Some(chunk) = field
        .try_next()
        .await
        .or_err_msg(400, "Malformed multipart body")?
    {
        if bytes.len() + chunk.len() > MAX_IMAGE_SIZE {
            return err!(413, "File too large");
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
