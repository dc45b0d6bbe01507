pub mod create_invite;

use create_invite::CreateInviteResponse;
use utoipa::OpenApi;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(create_invite::create_invite);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "invites")
    ),
    paths(create_invite::create_invite),
    components(schemas(CreateInviteResponse))
)]
pub struct InvitesApiDoc;
