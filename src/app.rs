use std::{path::PathBuf, sync::Arc};

use actix_files::Files;
use actix_web::web::{Data, ServiceConfig};
use utoipa_rapidoc::RapiDoc;

use crate::{
    apidocs::{setup_oapi, OPENAPI_JSON},
    auth::{self, OAuthConfig, SessionManager},
    bot,
    cache::{BotAdminCache, PublicStickerCache},
    clock::Clock,
    discord::DiscordApi,
    guilds, invites,
    invites::InviteResolver,
    media,
    site::{self, SiteFiles},
    stickers,
    store::{ConfigStore, InviteStore},
};

/// Everything the server needs that isn't discord or the clock.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub client_id: String,
    pub redirect_base: String,
    pub signing_key: [u8; 32],
    pub secure_cookies: bool,
    pub pinned_admin: Option<String>,
    pub invites_file: PathBuf,
    pub config_file: PathBuf,
    pub public_path: PathBuf,
}

/// Shared state of every worker. Built once, each worker registers clones of
/// the same handles.
#[derive(Clone)]
pub struct AppState {
    pub discord: Arc<dyn DiscordApi>,
    pub invites: Arc<InviteStore>,
    pub resolver: Arc<InviteResolver>,
    pub stickers: Arc<PublicStickerCache>,
    pub bot_admin: Arc<BotAdminCache>,
    pub config: Arc<ConfigStore>,
    pub sessions: Arc<SessionManager>,
    pub oauth: Arc<OAuthConfig>,
    pub files: Arc<SiteFiles>,
}

impl AppState {
    pub async fn build(
        discord: Arc<dyn DiscordApi>,
        clock: Arc<dyn Clock>,
        settings: &AppSettings,
    ) -> Self {
        let invites = Arc::new(InviteStore::new(
            settings.invites_file.clone(),
            Arc::clone(&clock),
        ));
        let resolver = Arc::new(InviteResolver::new(
            Arc::clone(&discord),
            Arc::clone(&invites),
        ));
        let stickers = Arc::new(PublicStickerCache::new(
            Arc::clone(&discord),
            Arc::clone(&resolver),
            Arc::clone(&clock),
        ));
        // the bot's user id is the application's client id
        let bot_admin = Arc::new(BotAdminCache::new(
            Arc::clone(&discord),
            Arc::clone(&clock),
            settings.client_id.clone(),
        ));

        let config = ConfigStore::open(settings.config_file.clone())
            .await
            .with_pinned_admin(settings.pinned_admin.clone());

        let sessions = SessionManager::new(settings.signing_key, clock)
            .with_secure_cookies(settings.secure_cookies);

        Self {
            discord,
            invites,
            resolver,
            stickers,
            bot_admin,
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            oauth: Arc::new(OAuthConfig::new(&settings.client_id, &settings.redirect_base)),
            files: Arc::new(SiteFiles::new(settings.public_path.clone())),
        }
    }

    /// Registers the shared state and every route. Static files go last so
    /// they never shadow a route.
    pub fn configure(&self, cfg: &mut ServiceConfig) {
        cfg.app_data(Data::from(Arc::clone(&self.discord)))
            .app_data(Data::from(Arc::clone(&self.invites)))
            .app_data(Data::from(Arc::clone(&self.resolver)))
            .app_data(Data::from(Arc::clone(&self.stickers)))
            .app_data(Data::from(Arc::clone(&self.bot_admin)))
            .app_data(Data::from(Arc::clone(&self.config)))
            .app_data(Data::from(Arc::clone(&self.sessions)))
            .app_data(Data::from(Arc::clone(&self.oauth)))
            .app_data(Data::from(Arc::clone(&self.files)));

        cfg.configure(auth::routes::configure_app)
            .configure(stickers::routes::configure_app)
            .configure(guilds::routes::configure_app)
            .configure(invites::routes::configure_app)
            .configure(bot::routes::configure_app)
            .configure(media::routes::configure_app)
            .configure(site::routes::configure_app);

        cfg.service(RapiDoc::with_openapi(OPENAPI_JSON, setup_oapi()).path("/api/docs"));

        cfg.service(Files::new("/", self.files.root()));
    }
}
