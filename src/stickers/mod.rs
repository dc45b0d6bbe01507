pub mod routes;
pub mod sticker;

// re-export
pub use sticker::PublicSticker;
