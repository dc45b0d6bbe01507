use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

use crate::{
    clock::Clock,
    discord::{models::Role, DiscordApi, DiscordResult},
};

struct AdminCheck {
    is_admin: bool,
    checked_at: DateTime<Utc>,
}

/// Per guild answer to "does the bot have administrator there?", each entry
/// expiring on its own.
pub struct BotAdminCache {
    discord: Arc<dyn DiscordApi>,
    clock: Arc<dyn Clock>,
    bot_user_id: String,
    ttl: Duration,
    entries: RwLock<HashMap<String, AdminCheck>>,
}

impl BotAdminCache {
    pub fn new(discord: Arc<dyn DiscordApi>, clock: Arc<dyn Clock>, bot_user_id: String) -> Self {
        Self {
            discord,
            clock,
            bot_user_id,
            ttl: Duration::minutes(2),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A failed check counts as `false` for this call only and is not cached.
    pub async fn is_admin(&self, guild_id: &str) -> bool {
        if let Some(is_admin) = self.cached(guild_id) {
            debug!("using cached bot admin status for guild {}: {}", guild_id, is_admin);
            return is_admin;
        }

        match self.check(guild_id).await {
            Ok(is_admin) => {
                self.entries.write().unwrap().insert(
                    guild_id.to_owned(),
                    AdminCheck {
                        is_admin,
                        checked_at: self.clock.now(),
                    },
                );
                info!("bot admin status for guild {}: {}", guild_id, is_admin);
                is_admin
            }
            Err(e) => {
                info!("cannot check bot permissions for guild {}: {}", guild_id, e);
                false
            }
        }
    }

    fn cached(&self, guild_id: &str) -> Option<bool> {
        let entries = self.entries.read().unwrap();
        entries
            .get(guild_id)
            .filter(|entry| self.clock.now() - entry.checked_at < self.ttl)
            .map(|entry| entry.is_admin)
    }

    async fn check(&self, guild_id: &str) -> DiscordResult<bool> {
        let member = self
            .discord
            .guild_member(guild_id, &self.bot_user_id)
            .await?;
        let roles = self.discord.guild_roles(guild_id).await?;

        Ok(roles_grant_admin(&member.roles, &roles))
    }
}

/// True if any of the `held` roles carries the administrator bit.
pub fn roles_grant_admin(held: &[String], roles: &[Role]) -> bool {
    roles
        .iter()
        .filter(|role| held.contains(&role.id))
        .any(|role| match role.permissions() {
            Some(permissions) if permissions.is_admin() => {
                debug!("role `{}` grants administrator", role.name);
                true
            }
            _ => false,
        })
}
