use utoipa::OpenApi;

pub mod callback;
pub mod check_auth;
pub mod login;
pub mod logout;
pub mod user;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(login::login)
        .service(callback::callback)
        .service(logout::logout)
        .service(check_auth::check_auth)
        .service(user::user);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "auth")
    ),
    paths(
        login::login,
        callback::callback,
        logout::logout,
        check_auth::check_auth,
        user::user,
    ),
    components(schemas(check_auth::AuthStatus))
)]
pub struct AuthApiDocs;
