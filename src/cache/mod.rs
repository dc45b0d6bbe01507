pub mod bot_admin_cache;
pub mod sticker_cache;

// re-export
pub use bot_admin_cache::BotAdminCache;
pub use sticker_cache::PublicStickerCache;
