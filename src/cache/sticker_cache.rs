use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use log::{info, warn};

use crate::{
    clock::Clock,
    discord::{models::PartialGuild, DiscordApi, DiscordResult},
    invites::InviteResolver,
    stickers::PublicSticker,
};

struct Snapshot {
    stickers: Arc<Vec<PublicSticker>>,
    captured_at: DateTime<Utc>,
}

#[derive(Default)]
struct Slot {
    snapshot: Option<Snapshot>,
    // bumped by invalidate(), a rebuild only lands if this didn't move
    generation: u64,
}

/// The public sticker listing, rebuilt from discord at most once per
/// freshness window.
pub struct PublicStickerCache {
    discord: Arc<dyn DiscordApi>,
    resolver: Arc<InviteResolver>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slot: RwLock<Slot>,
}

impl PublicStickerCache {
    pub fn new(
        discord: Arc<dyn DiscordApi>,
        resolver: Arc<InviteResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            discord,
            resolver,
            clock,
            ttl: Duration::minutes(5),
            slot: RwLock::new(Slot::default()),
        }
    }

    /// Returns the cached listing, rebuilding it first if it is missing or
    /// older than the freshness window.
    ///
    /// Fails only if the bot's guild list can't be fetched; single guilds that
    /// fail just contribute nothing.
    pub async fn get(&self) -> DiscordResult<Arc<Vec<PublicSticker>>> {
        if !self.discord.has_bot_token() {
            return Ok(Arc::new(Vec::new()));
        }

        let generation = {
            let slot = self.slot.read().unwrap();
            if let Some(snapshot) = &slot.snapshot {
                if self.clock.now() - snapshot.captured_at < self.ttl {
                    return Ok(Arc::clone(&snapshot.stickers));
                }
            }
            slot.generation
        };

        let stickers = Arc::new(self.rebuild().await?);

        let mut slot = self.slot.write().unwrap();
        if slot.generation == generation {
            slot.snapshot = Some(Snapshot {
                stickers: Arc::clone(&stickers),
                captured_at: self.clock.now(),
            });
        }

        Ok(stickers)
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap();
        slot.snapshot = None;
        slot.generation += 1;
    }

    async fn rebuild(&self) -> DiscordResult<Vec<PublicSticker>> {
        let guilds = self.discord.bot_guilds().await?;

        let per_guild = join_all(guilds.iter().map(|guild| self.guild_stickers(guild))).await;
        let stickers: Vec<PublicSticker> = per_guild.into_iter().flatten().collect();

        info!(
            "rebuilt public sticker listing: {} stickers from {} guilds",
            stickers.len(),
            guilds.len()
        );

        Ok(stickers)
    }

    async fn guild_stickers(&self, guild: &PartialGuild) -> Vec<PublicSticker> {
        let stickers = match self.discord.guild_stickers(&guild.id).await {
            Ok(stickers) => stickers,
            Err(e) => {
                warn!("failed to fetch stickers for guild {}: {}", guild.id, e);
                return Vec::new();
            }
        };

        let invite_code = match self.resolver.resolve(&guild.id).await {
            Some(invite) => invite.code,
            None => guild.id.clone(),
        };

        stickers
            .into_iter()
            .map(|sticker| PublicSticker::new(sticker, guild, &invite_code))
            .collect()
    }
}
