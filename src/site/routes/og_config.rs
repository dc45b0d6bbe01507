use actix_web::{
    get, post,
    web::{Data, Json},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::AdminEx,
    error::{HResult, IntoHandlerErrorResult},
    store::{ConfigStore, OgConfig},
};

#[derive(Serialize, ToSchema)]
pub struct OgConfigUpdated {
    success: bool,
    config: OgConfig,
}

/// Get Open Graph Config
#[utoipa::path(
    responses(
        (status = OK, description = "Current Open Graph config", body = OgConfig)
    ),
    tag = "site"
)]
#[get("/api/og-config")]
pub async fn get_og_config(config: Data<ConfigStore>) -> Json<OgConfig> {
    Json(config.og_config())
}

/// Update Open Graph Config
///
/// Replaces the whole config. Missing or empty fields fall back to their
/// defaults.
#[utoipa::path(
    request_body = OgConfig,
    responses(
        (status = OK, description = "Config saved", body = OgConfigUpdated),
        (status = UNAUTHORIZED, description = "Not logged in"),
        (status = FORBIDDEN, description = "Not the admin"),
        (status = INTERNAL_SERVER_ERROR, description = "Config file could not be written")
    ),
    tag = "site",
    security(("session" = []))
)]
#[post("/api/og-config")]
pub async fn update_og_config(
    _admin: AdminEx,
    config: Data<ConfigStore>,
    req: Json<OgConfig>,
) -> HResult<Json<OgConfigUpdated>> {
    let saved = config
        .update_og_config(req.into_inner())
        .await
        .or_err_msg(500, "Failed to save OG config")?;

    Ok(Json(OgConfigUpdated {
        success: true,
        config: saved,
    }))
}
