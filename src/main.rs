use std::{sync::Arc, time::Duration};

use actix_web::{App, HttpServer};
use log::{debug, info};

use sticker_showcase::{
    app::{AppSettings, AppState},
    clock::SystemClock,
    discord::{DiscordApi, DiscordClient},
    options,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    options::initialize_all();
    options::print_all();

    let discord: Arc<dyn DiscordApi> = Arc::new(DiscordClient::new(
        &options::DISCORD_API_URL,
        &options::DISCORD_CLIENT_ID,
        &options::DISCORD_CLIENT_SECRET,
        options::DISCORD_BOT_TOKEN.clone(),
    ));

    let settings = AppSettings {
        client_id: options::DISCORD_CLIENT_ID.clone(),
        redirect_base: options::DISCORD_REDIRECT_URI.clone(),
        signing_key: *options::SESSION_SIGNING_KEY,
        secure_cookies: *options::SECURE_COOKIES,
        pinned_admin: options::ADMIN_USER_ID.clone(),
        invites_file: options::invites_file(),
        config_file: options::config_file(),
        public_path: options::PUBLIC_PATH.clone(),
    };

    let state = AppState::build(discord, Arc::new(SystemClock), &settings).await;

    // expired sessions are otherwise only dropped when someone presents them
    let sessions = Arc::clone(&state.sessions);
    actix_rt::spawn(async move {
        let mut interval = actix_rt::time::interval(Duration::from_secs(60 * 60));
        loop {
            interval.tick().await;
            let removed = sessions.sweep_expired();
            if removed > 0 {
                debug!("swept {} expired sessions", removed);
            }
        }
    });

    let mut server = HttpServer::new(move || {
        // add logging middleware
        App::new()
            .wrap(actix_web::middleware::Logger::new("%{r}a %r -> %s in %Dms").log_target("http"))
            .configure(|cfg| state.configure(cfg))
    })
    .workers(*options::NUM_WEB_WORKERS)
    .bind(options::bind_addr())?;

    if *options::SSL_ENABLE {
        server = server.bind_rustls_021(options::ssl_bind_addr(), options::ssl_config())?;
    }

    server.run().await
}
