use std::{
    future::{ready, Ready},
    ops::Deref,
    sync::Arc,
};

use actix_web::{web::Data, FromRequest};

use crate::{
    error::{HandlerError, IntoHandlerErrorResult},
    store::ConfigStore,
};

use super::{session_manager::request_session, Session};

/// Extracts the session of the site admin.
///
/// 401 without a session, 403 if the session belongs to anyone else.
pub struct AdminEx(pub Arc<Session>);

impl Deref for AdminEx {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AdminEx {
    type Error = HandlerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let session = match request_session(req) {
            Ok(session) => session,
            Err(e) => return ready(Err(e)),
        };

        let is_admin = req
            .app_data::<Data<ConfigStore>>()
            .is_some_and(|config| config.is_admin(&session.user_id));

        ready(is_admin.then(|| AdminEx(session)).or_err(403))
    }
}
