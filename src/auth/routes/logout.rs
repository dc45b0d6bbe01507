use actix_web::{get, http::header, web::Data, HttpRequest, HttpResponse};
use log::info;

use crate::auth::{session_manager::SESSION_COOKIE, SessionManager};

/// Log Out
///
/// Forgets the session (if any) and sends the browser back to `/admin`.
#[utoipa::path(
    responses(
        (status = FOUND, description = "Redirect to the admin page")
    ),
    tag = "auth"
)]
#[get("/logout")]
pub async fn logout(req: HttpRequest, sm: Data<SessionManager>) -> HttpResponse {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        if sm.erase(cookie.value()) {
            info!("session ended");
        }
    }

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/admin"))
        .cookie(sm.removal_cookie(SESSION_COOKIE))
        .finish()
}
