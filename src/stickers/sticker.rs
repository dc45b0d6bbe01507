use serde::Serialize;
use utoipa::ToSchema;

use crate::discord::models::{PartialGuild, Sticker, StickerFormatType};

/// One entry of the public listing: a sticker plus enough about its guild to
/// render a join link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PublicSticker {
    #[schema(example = "749054660769218631")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub guild_id: String,
    pub guild_name: String,
    pub guild_icon: Option<String>,
    /// 1 = png, 2 = apng, 3 = lottie, 4 = gif
    #[schema(value_type = u8, example = 1)]
    pub format_type: StickerFormatType,
    /// Invite code, or the guild id when no invite could be found.
    #[schema(example = "abc")]
    pub invite_code: String,
}

impl PublicSticker {
    pub fn new(sticker: Sticker, guild: &PartialGuild, invite_code: &str) -> Self {
        Self {
            id: sticker.id,
            name: sticker.name,
            description: sticker.description,
            guild_id: guild.id.clone(),
            guild_name: guild.name.clone(),
            guild_icon: guild.icon.clone(),
            format_type: sticker.format_type,
            invite_code: invite_code.to_owned(),
        }
    }
}
