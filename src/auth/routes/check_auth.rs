use actix_web::{get, web::{Data, Json}};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::SessionEx,
    store::{ConfigStore, SetupState},
};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    /// Whether the caller is logged in as the admin.
    authenticated: bool,
    username: Option<String>,
    /// False until the first login claims the admin role.
    setup_complete: bool,
}

/// Check Auth
///
/// Reports whether the caller holds an admin session. Never fails, callers
/// without a session just get `authenticated: false`.
#[utoipa::path(
    responses(
        (status = OK, description = "Auth status", body = AuthStatus)
    ),
    tag = "auth"
)]
#[get("/api/check-auth")]
pub async fn check_auth(session: Option<SessionEx>, config: Data<ConfigStore>) -> Json<AuthStatus> {
    let authenticated = session
        .as_ref()
        .is_some_and(|session| config.is_admin(&session.user_id));

    Json(AuthStatus {
        authenticated,
        username: session.map(|session| session.username.clone()),
        setup_complete: config.setup_state() != SetupState::Uninitialized,
    })
}
