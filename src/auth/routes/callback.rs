use actix_web::{
    get,
    http::header,
    web::{Data, Query},
    HttpRequest, HttpResponse,
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::{
    auth::{OAuthConfig, SessionManager},
    discord::DiscordApi,
    store::{AdminClaim, ConfigStore},
    util::constant_time_compare,
};

use super::login::STATE_COOKIE;

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
}

fn redirect_to_admin(error: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/admin?error={}", error)))
        .finish()
}

/// OAuth Callback
///
/// Where discord sends the admin back to after authorizing. Exchanges the
/// code, identifies the user and starts a session if they are (or, on a fresh
/// install, become) the admin. Always redirects to `/admin`, with an `error`
/// query parameter on failure.
#[utoipa::path(
    params(
        ("code" = Option<String>, Query, description = "Authorization code"),
        ("state" = Option<String>, Query, description = "State sent with the login redirect"),
    ),
    responses(
        (status = FOUND, description = "Redirect to the admin page")
    ),
    tag = "auth"
)]
#[get("/admin/callback")]
pub async fn callback(
    req: HttpRequest,
    query: Query<CallbackQuery>,
    sm: Data<SessionManager>,
    oauth: Data<OAuthConfig>,
    config: Data<ConfigStore>,
    discord: Data<dyn DiscordApi>,
) -> HttpResponse {
    let code = match query.code.as_deref() {
        Some(code) if !code.is_empty() => code,
        _ => return redirect_to_admin("no_code"),
    };

    let expected_state = req
        .cookie(STATE_COOKIE)
        .and_then(|cookie| sm.verify(cookie.value()).map(str::to_owned));

    let state_matches = match (expected_state, query.state.as_deref()) {
        (Some(expected), Some(given)) => constant_time_compare(&expected, given),
        _ => false,
    };

    if !state_matches {
        warn!("oauth callback with a missing or mismatched state");
        return redirect_to_admin("invalid_state");
    }

    let token = match discord.exchange_code(code, &oauth.callback_uri()).await {
        Ok(token) => token,
        Err(e) => {
            error!("OAuth error: {}", e);
            return redirect_to_admin("auth_failed");
        }
    };

    let user = match discord.current_user(&token.access_token).await {
        Ok(user) => user,
        Err(e) => {
            error!("OAuth error while fetching user: {}", e);
            return redirect_to_admin("auth_failed");
        }
    };

    match config.claim_admin(&user.id).await {
        Ok(AdminClaim::Claimed) => info!("{} ({}) completed setup", user.username, user.id),
        Ok(AdminClaim::Admin) => info!("{} logged in", user.username),
        Ok(AdminClaim::Rejected) => {
            warn!("Unauthorized access attempt by: {} ({})", user.username, user.id);
            return redirect_to_admin("unauthorized");
        }
        Err(e) => {
            error!("failed to save setup state: {}", e);
            return redirect_to_admin("auth_failed");
        }
    }

    let session = sm.create(&user, token.access_token);

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/admin"))
        .cookie(sm.session_cookie(session))
        .cookie(sm.removal_cookie(STATE_COOKIE))
        .finish()
}
