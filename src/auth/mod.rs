pub mod admin;
pub mod routes;
pub mod session_manager;

// re-export
pub use admin::AdminEx;
pub use session_manager::{Session, SessionEx, SessionManager};

/// The discord application this server logs admins in with.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    /// Public base url of this server, without a trailing slash.
    pub redirect_base: String,
}

impl OAuthConfig {
    pub fn new(client_id: &str, redirect_base: &str) -> Self {
        Self {
            client_id: client_id.to_owned(),
            redirect_base: redirect_base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn callback_uri(&self) -> String {
        format!("{}/admin/callback", self.redirect_base)
    }
}
