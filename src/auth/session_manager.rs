use std::{
    collections::HashMap,
    future::{ready, Ready},
    ops::Deref,
    sync::{Arc, RwLock},
};

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, CookieBuilder, SameSite},
    web::Data,
    FromRequest, HttpRequest,
};
use chrono::{DateTime, Duration, Utc};
use nanoid::nanoid;

use crate::{
    clock::Clock,
    crypto,
    discord::models::User,
    error::{HResult, HandlerError, IntoHandlerErrorResult},
};

pub type SessionToken = String;

pub const SESSION_COOKIE: &str = "Session";
const SESSION_DAYS: i64 = 30;

/// A logged in discord user.
///
/// Holds the user's OAuth access token, never send this to the client.
#[derive(Debug)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub access_token: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory sessions. The cookie carries `token.signature`, signed with the
/// session secret so guessed or tampered cookies are rejected before lookup.
pub struct SessionManager {
    signing_key: [u8; 32],
    clock: Arc<dyn Clock>,
    max_age: Duration,
    secure_cookies: bool,
    sessions: RwLock<HashMap<SessionToken, Arc<Session>>>,
}

impl SessionManager {
    pub fn new(signing_key: [u8; 32], clock: Arc<dyn Clock>) -> Self {
        Self {
            signing_key,
            clock,
            max_age: Duration::days(SESSION_DAYS),
            secure_cookies: false,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Starts a session and returns the signed cookie value for it.
    pub fn create(&self, user: &User, access_token: String) -> String {
        let token = nanoid!(64);

        let session = Arc::new(Session {
            user_id: user.id.clone(),
            username: user.username.clone(),
            access_token,
            created_at: self.clock.now(),
        });

        self.sessions.write().unwrap().insert(token.clone(), session);

        crypto::sign_cookie_value(&self.signing_key, &token)
    }

    pub fn get(&self, cookie_value: &str) -> Option<Arc<Session>> {
        let token = crypto::verify_cookie_value(&self.signing_key, cookie_value)?;

        let session = self.sessions.read().unwrap().get(token).cloned()?;
        if self.clock.now() - session.created_at >= self.max_age {
            self.sessions.write().unwrap().remove(token);
            return None;
        }

        Some(session)
    }

    /// Drops every expired session, returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, session| now - session.created_at < self.max_age);
        before - sessions.len()
    }

    pub fn erase(&self, cookie_value: &str) -> bool {
        match crypto::verify_cookie_value(&self.signing_key, cookie_value) {
            Some(token) => self.sessions.write().unwrap().remove(token).is_some(),
            None => false,
        }
    }

    pub fn sign(&self, value: &str) -> String {
        crypto::sign_cookie_value(&self.signing_key, value)
    }

    pub fn verify<'a>(&self, signed: &'a str) -> Option<&'a str> {
        crypto::verify_cookie_value(&self.signing_key, signed)
    }

    pub fn build_cookie<'c>(&self, name: &'c str, value: String) -> CookieBuilder<'c> {
        Cookie::build(name, value)
            .secure(self.secure_cookies)
            // disallow js access
            .http_only(true)
            .path("/")
            // lax so the cookie survives the redirect back from discord
            .same_site(SameSite::Lax)
    }

    pub fn session_cookie(&self, value: String) -> Cookie<'static> {
        self.build_cookie(SESSION_COOKIE, value)
            .max_age(CookieDuration::days(SESSION_DAYS))
            .finish()
    }

    /// Cookie that makes the browser drop `name`.
    pub fn removal_cookie<'c>(&self, name: &'c str) -> Cookie<'c> {
        let mut cookie = self.build_cookie(name, String::new()).finish();
        cookie.make_removal();
        cookie
    }
}

/// Extracts the caller's session, 401 if there is none.
pub struct SessionEx(pub Arc<Session>);

impl Deref for SessionEx {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for SessionEx {
    type Error = HandlerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        ready(request_session(req).map(SessionEx))
    }
}

pub(crate) fn request_session(req: &HttpRequest) -> HResult<Arc<Session>> {
    req.cookie(SESSION_COOKIE)
        .and_then(|cookie| {
            req.app_data::<Data<SessionManager>>()?
                .get(cookie.value())
        })
        .or_err(401)
}
