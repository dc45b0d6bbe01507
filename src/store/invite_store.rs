use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::clock::Clock;

use super::{read_json, write_json, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInvite {
    pub code: String,
    pub created_at: DateTime<Utc>,
}

pub type InviteMap = BTreeMap<String, StoredInvite>;

/// Guild id -> remembered invite code, kept in a single json file.
///
/// Entries never expire. The file is reread on every lookup, so edits made
/// by hand show up without a restart.
pub struct InviteStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl InviteStore {
    pub fn new(path: PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self {
            path,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn load(&self) -> InviteMap {
        read_json(&self.path).await
    }

    pub async fn get(&self, guild_id: &str) -> Option<String> {
        self.load().await.remove(guild_id).map(|invite| invite.code)
    }

    pub async fn save(&self, guild_id: &str, code: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut invites = self.load().await;
        if invites.get(guild_id).is_some_and(|stored| stored.code == code) {
            return Ok(());
        }

        invites.insert(
            guild_id.to_owned(),
            StoredInvite {
                code: code.to_owned(),
                created_at: self.clock.now(),
            },
        );

        write_json(&self.path, &invites).await?;
        info!("stored invite `{}` for guild {}", code, guild_id);

        Ok(())
    }
}
