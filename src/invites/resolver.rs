use std::sync::Arc;

use derive_more::{Display, Error};
use log::{debug, info, warn};

use crate::{
    discord::{
        models::{CreateInvite, GUILD_TEXT},
        DiscordApi, DiscordError,
    },
    store::InviteStore,
};

/// Where a resolved invite code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteSource {
    Stored,
    Vanity,
    ExistingPermanent,
    Existing,
    Created,
}

impl InviteSource {
    pub fn describe(self) -> &'static str {
        match self {
            InviteSource::Stored => "Using stored permanent invite",
            InviteSource::Vanity => "Using vanity URL",
            InviteSource::ExistingPermanent => "Permanent invite already exists",
            InviteSource::Existing => "Using existing invite",
            InviteSource::Created => "Invite created successfully",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInvite {
    pub code: String,
    pub source: InviteSource,
}

#[derive(Debug, Display, Error)]
pub enum CreateInviteError {
    #[display(fmt = "No suitable channel found")]
    NoChannel,
    #[display(fmt = "{}", _0)]
    Upstream(DiscordError),
}

/// Finds a usable invite code for a guild.
///
/// Lookup order is: invite store, vanity url, the guild's existing invites.
/// Every code found on discord is written back to the store, so later
/// lookups for that guild never touch the network.
pub struct InviteResolver {
    discord: Arc<dyn DiscordApi>,
    store: Arc<InviteStore>,
}

impl InviteResolver {
    pub fn new(discord: Arc<dyn DiscordApi>, store: Arc<InviteStore>) -> Self {
        Self { discord, store }
    }

    /// Passive lookup used while building listings. Never creates an invite;
    /// every discord failure just counts as "not found".
    pub async fn resolve(&self, guild_id: &str) -> Option<ResolvedInvite> {
        self.lookup(guild_id, false).await
    }

    /// Explicit admin request: reuse a stored, vanity or permanent invite if
    /// there is one, otherwise create a permanent invite on the first text
    /// channel (or the first channel of any kind).
    pub async fn create(&self, guild_id: &str) -> Result<ResolvedInvite, CreateInviteError> {
        if let Some(found) = self.lookup(guild_id, true).await {
            return Ok(found);
        }

        let channels = self
            .discord
            .guild_channels(guild_id)
            .await
            .map_err(CreateInviteError::Upstream)?;

        let channel = channels
            .iter()
            .find(|channel| channel.kind == GUILD_TEXT)
            .or_else(|| channels.first())
            .ok_or(CreateInviteError::NoChannel)?;

        let invite = self
            .discord
            .create_channel_invite(&channel.id, &CreateInvite::permanent())
            .await
            .map_err(CreateInviteError::Upstream)?;

        info!(
            "created invite `{}` in channel {} of guild {}",
            invite.code, channel.id, guild_id
        );

        Ok(self.remember(guild_id, invite.code, InviteSource::Created).await)
    }

    async fn lookup(&self, guild_id: &str, permanent_only: bool) -> Option<ResolvedInvite> {
        if let Some(code) = self.store.get(guild_id).await {
            return Some(ResolvedInvite {
                code,
                source: InviteSource::Stored,
            });
        }

        match self.discord.guild_vanity_url(guild_id).await {
            Ok(vanity) => {
                if let Some(code) = vanity.code.filter(|code| !code.is_empty()) {
                    return Some(self.remember(guild_id, code, InviteSource::Vanity).await);
                }
            }
            Err(e) => debug!("no vanity url for guild {}: {}", guild_id, e),
        }

        let invites = match self.discord.guild_invites(guild_id).await {
            Ok(invites) => invites,
            Err(e) => {
                debug!("cannot list invites of guild {}: {}", guild_id, e);
                return None;
            }
        };

        let (invite, source) = match invites.iter().find(|invite| invite.is_permanent()) {
            Some(invite) => (invite, InviteSource::ExistingPermanent),
            None if permanent_only => return None,
            None => (invites.first()?, InviteSource::Existing),
        };

        Some(self.remember(guild_id, invite.code.clone(), source).await)
    }

    async fn remember(&self, guild_id: &str, code: String, source: InviteSource) -> ResolvedInvite {
        if let Err(e) = self.store.save(guild_id, &code).await {
            warn!("failed to store invite for guild {}: {}", guild_id, e);
        }

        ResolvedInvite { code, source }
    }
}
