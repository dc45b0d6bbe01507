use actix_web::{cookie::time::Duration, get, http::header, web::Data, HttpResponse};
use nanoid::nanoid;

use crate::{
    auth::{OAuthConfig, SessionManager},
    discord::login_authorize_url,
};

pub const STATE_COOKIE: &str = "oauth_state";

/// Log In
///
/// Redirects to discord's authorization page. The `state` parameter sent
/// along is remembered in a signed cookie and checked on the way back.
#[utoipa::path(
    responses(
        (status = FOUND, description = "Redirect to discord")
    ),
    tag = "auth"
)]
#[get("/login")]
pub async fn login(sm: Data<SessionManager>, oauth: Data<OAuthConfig>) -> HttpResponse {
    let state = nanoid!(32);

    let state_cookie = sm
        .build_cookie(STATE_COOKIE, sm.sign(&state))
        .max_age(Duration::minutes(10))
        .finish();

    let url = login_authorize_url(&oauth.client_id, &oauth.callback_uri(), &state);

    HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .cookie(state_cookie)
        .finish()
}
