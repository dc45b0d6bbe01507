// Re-export internals for use under the sticker_showcase crate namespace
// Mainly for use in tests
pub mod apidocs;
pub mod app;
pub mod auth;
pub mod bot;
pub mod cache;
pub mod clock;
pub mod crypto;
pub mod discord;
pub mod error;
pub mod guilds;
pub mod invites;
pub mod media;
pub mod options;
pub mod site;
pub mod stickers;
pub mod store;
pub mod util;
