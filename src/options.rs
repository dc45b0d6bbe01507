use std::{
    fs::File,
    io::BufReader,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use lazy_static::lazy_static;
use log::{error, info, warn};
use rustls::ServerConfig;

use crate::discord::DISCORD_API;

// get and parse an environment variable
// use default value if not set
fn var<T>(name: &str, default: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Debug,
{
    let given = std::env::var(name).unwrap_or(default.to_owned());
    match given.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(
                "Invalid config option `{}={}`: {:?} ({}'s default is usually {})",
                name, given, e, name, default
            );
            std::process::exit(1);
        }
    }
}

// optional variables: unset and empty both mean "not configured"
fn opt_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

lazy_static! {
    pub static ref NUM_WEB_WORKERS: usize = var("NUM_WEB_WORKERS", "2");

    pub static ref BIND_ADDR: SocketAddr = {
        let mut addr: SocketAddr = var("BIND_ADDR", "127.0.0.1:3000");
        // PORT is what most hosting platforms hand out
        if opt_var("PORT").is_some() {
            addr.set_port(var("PORT", "3000"));
        }
        addr
    };

    pub static ref SSL_ENABLE: bool = var("SSL_ENABLE", "false");
    pub static ref SSL_BIND_ADDR: SocketAddr = var("SSL_BIND_ADDR", "127.0.0.1:3443");
    static ref SSL_CERT_PATH: String = var("SSL_CERT_PATH", "cert.pem");
    static ref SSL_KEY_PATH: String = var("SSL_KEY_PATH", "key.pem");

    pub static ref SECURE_COOKIES: bool = var("SECURE_COOKIES", "false");

    pub static ref DISCORD_CLIENT_ID: String = var("DISCORD_CLIENT_ID", "");
    pub static ref DISCORD_CLIENT_SECRET: String = var("DISCORD_CLIENT_SECRET", "");
    pub static ref DISCORD_REDIRECT_URI: String = {
        let uri: String = var("DISCORD_REDIRECT_URI", "http://localhost:3000");
        uri.trim_end_matches('/').to_owned()
    };
    pub static ref DISCORD_BOT_TOKEN: Option<String> = opt_var("DISCORD_BOT_TOKEN");
    pub static ref DISCORD_API_URL: String = var("DISCORD_API_URL", DISCORD_API);

    /// Pre-seeds the admin identity, skipping the first-login setup.
    pub static ref ADMIN_USER_ID: Option<String> = opt_var("ADMIN_USER_ID");

    pub static ref DATA_PATH: PathBuf = {
        let path: String = var("DATA_PATH", "data");

        // create directory
        std::fs::create_dir_all(&path).expect("failed to create directory specified by DATA_PATH");

        let is_read_only = std::fs::metadata(&path).unwrap().permissions().readonly();
        if is_read_only {
            warn!("\n\nDATA_PATH directory at `{}` is not writable!\nInvites and settings will not be saved!\n\n", path);
        }

        PathBuf::from(path)
    };

    pub static ref PUBLIC_PATH: PathBuf = PathBuf::from(var::<String>("PUBLIC_PATH", "public"));

    pub static ref SESSION_SIGNING_KEY: [u8; 32] = {
        let key: String = var("SESSION_SECRET", "");

        if key.is_empty() {
            info!("Generating new session signing key... (provide one with SESSION_SECRET)");
            warn!("Sessions will not survive a restart without SESSION_SECRET");
            crate::crypto::generate_signing_key()
        } else {
            let key = match hex::decode(key) {
                Ok(key) => key,
                Err(e) => {
                    error!("SESSION_SECRET must be hex encoded: {}", e);
                    std::process::exit(1);
                }
            };
            if key.len() != 32 {
                error!("Invalid session secret length, must be 32 bytes");
                std::process::exit(1);
            }
            key.try_into().unwrap()
        }
    };
}

pub fn bind_addr() -> (IpAddr, u16) {
    (BIND_ADDR.ip(), BIND_ADDR.port())
}

pub fn ssl_bind_addr() -> (IpAddr, u16) {
    (SSL_BIND_ADDR.ip(), SSL_BIND_ADDR.port())
}

pub fn invites_file() -> PathBuf {
    DATA_PATH.join("invites.json")
}

pub fn config_file() -> PathBuf {
    DATA_PATH.join("config.json")
}

pub fn uploads_path() -> PathBuf {
    PUBLIC_PATH.join("uploads")
}

/// Load the SSL certificate and key files into a rustls config object
///
/// Taken from https://github.com/actix/examples/blob/master/https-tls/rustls/src/main.rs
pub fn ssl_config() -> rustls::ServerConfig {
    // init server config builder with safe defaults
    let config = ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth();

    // load TLS key/cert files
    let cert_file = &mut BufReader::new(File::open(&*SSL_CERT_PATH).unwrap());
    let key_file = &mut BufReader::new(File::open(&*SSL_KEY_PATH).unwrap());

    // convert files to key/cert objects
    let cert_chain = rustls_pemfile::certs(cert_file)
        .unwrap()
        .into_iter()
        .map(rustls::Certificate)
        .collect();

    let mut keys: Vec<rustls::PrivateKey> = rustls_pemfile::pkcs8_private_keys(key_file)
        .unwrap()
        .into_iter()
        .map(rustls::PrivateKey)
        .collect();

    // exit if no keys could be parsed
    if keys.is_empty() {
        error!("Could not locate SSL private key at {}", *SSL_KEY_PATH);
        std::process::exit(1);
    }

    config.with_single_cert(cert_chain, keys.remove(0)).unwrap()
}

pub fn initialize_all() {
    lazy_static::initialize(&NUM_WEB_WORKERS);
    lazy_static::initialize(&BIND_ADDR);

    lazy_static::initialize(&SSL_ENABLE);
    lazy_static::initialize(&SSL_BIND_ADDR);
    lazy_static::initialize(&SSL_CERT_PATH);
    lazy_static::initialize(&SSL_KEY_PATH);
    lazy_static::initialize(&SECURE_COOKIES);

    lazy_static::initialize(&DISCORD_CLIENT_ID);
    lazy_static::initialize(&DISCORD_CLIENT_SECRET);
    lazy_static::initialize(&DISCORD_REDIRECT_URI);
    lazy_static::initialize(&DISCORD_BOT_TOKEN);
    lazy_static::initialize(&DISCORD_API_URL);

    if DISCORD_CLIENT_ID.is_empty() || DISCORD_CLIENT_SECRET.is_empty() {
        error!("DISCORD_CLIENT_ID and DISCORD_CLIENT_SECRET must both be set");
        std::process::exit(1);
    }

    lazy_static::initialize(&ADMIN_USER_ID);
    lazy_static::initialize(&DATA_PATH);
    lazy_static::initialize(&PUBLIC_PATH);
    lazy_static::initialize(&SESSION_SIGNING_KEY);
}

pub fn print_all() {
    info!("config: Listening on {}", *BIND_ADDR);

    if *SSL_ENABLE {
        info!("config: Listening (TLS) on {}", *SSL_BIND_ADDR);
    }

    info!("config: Web workers: {}", *NUM_WEB_WORKERS);
    info!("config: Discord client id: {}", *DISCORD_CLIENT_ID);
    info!("config: OAuth redirect: {}/admin/callback", *DISCORD_REDIRECT_URI);

    if *DISCORD_API_URL != DISCORD_API {
        info!("config: Discord API overridden: {}", *DISCORD_API_URL);
    }

    if DISCORD_BOT_TOKEN.is_none() {
        warn!("DISCORD_BOT_TOKEN is not set, sticker listings will be empty!");
    }

    if let Some(admin) = ADMIN_USER_ID.as_ref() {
        info!("config: Admin user pinned to {}", admin);
    }

    if !*SECURE_COOKIES {
        warn!("SECURE_COOKIES is off, session cookies will be sent over plain http");
    }

    info!("config: Data stored in: {}", DATA_PATH.display());
    info!("config: Static files served from: {}", PUBLIC_PATH.display());
}
