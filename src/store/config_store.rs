use std::{path::PathBuf, sync::RwLock};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use utoipa::ToSchema;

use super::{read_json, write_json, StoreError};

pub const DEFAULT_TITLE: &str = "Discord Stickers Showcase";
pub const DEFAULT_DESCRIPTION: &str = "Explore our collection of Discord stickers from various servers";
pub const DEFAULT_IMAGE: &str =
    "https://via.placeholder.com/1200x630/0a0a0a/ffffff?text=Discord+Stickers";
pub const DEFAULT_TYPE: &str = "website";

/// Open Graph / twitter card values rendered into the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct OgConfig {
    #[schema(example = "Discord Stickers Showcase")]
    pub title: String,
    pub description: String,
    pub image: String,
    /// Canonical site url, empty means "whatever host the request came in on".
    pub url: String,
    #[serde(rename = "type")]
    #[schema(example = "website")]
    pub kind: String,
    pub site_name: String,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            description: DEFAULT_DESCRIPTION.into(),
            image: DEFAULT_IMAGE.into(),
            url: String::new(),
            kind: DEFAULT_TYPE.into(),
            site_name: DEFAULT_TITLE.into(),
        }
    }
}

impl OgConfig {
    /// Replaces blank fields with their defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let pick = |given: String, default: String| {
            let trimmed = given.trim();
            if trimmed.is_empty() {
                default
            } else {
                trimmed.to_owned()
            }
        };

        Self {
            title: pick(self.title, defaults.title),
            description: pick(self.description, defaults.description),
            image: pick(self.image, defaults.image),
            url: pick(self.url, defaults.url),
            kind: pick(self.kind, defaults.kind),
            site_name: pick(self.site_name, defaults.site_name),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SiteConfig {
    setup_complete: bool,
    admin_user_id: Option<String>,
    og: OgConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupState {
    Uninitialized,
    Configured { admin_id: String },
}

/// Outcome of a completed OAuth login against the setup state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminClaim {
    /// Setup was incomplete, this user is now the admin.
    Claimed,
    /// This user already is the admin.
    Admin,
    /// Someone else is the admin.
    Rejected,
}

/// The site config file: one-time setup state plus the Open Graph values.
///
/// Read once when opened and served from memory after that. The only legal
/// setup transition is `Uninitialized -> Configured`, done by
/// [`ConfigStore::claim_admin`].
pub struct ConfigStore {
    path: PathBuf,
    current: RwLock<SiteConfig>,
    // setup claims and og updates persist under this lock so a concurrent
    // first login can't also win
    write_lock: Mutex<()>,
    pinned_admin: Option<String>,
}

impl ConfigStore {
    pub async fn open(path: PathBuf) -> Self {
        let mut current: SiteConfig = read_json(&path).await;
        current.og = current.og.normalized();

        if current.setup_complete && current.admin_user_id.is_none() {
            warn!("config says setup is complete but names no admin, setup will run again");
            current.setup_complete = false;
        }

        Self {
            path,
            current: RwLock::new(current),
            write_lock: Mutex::new(()),
            pinned_admin: None,
        }
    }

    /// Pins the admin identity, the stored setup state is ignored from then on.
    pub fn with_pinned_admin(mut self, admin_id: Option<String>) -> Self {
        self.pinned_admin = admin_id;
        self
    }

    pub fn setup_state(&self) -> SetupState {
        if let Some(admin_id) = &self.pinned_admin {
            return SetupState::Configured {
                admin_id: admin_id.clone(),
            };
        }

        let current = self.current.read().unwrap();
        match (&current.admin_user_id, current.setup_complete) {
            (Some(admin_id), true) => SetupState::Configured {
                admin_id: admin_id.clone(),
            },
            _ => SetupState::Uninitialized,
        }
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        matches!(self.setup_state(), SetupState::Configured { admin_id } if admin_id == user_id)
    }

    pub async fn claim_admin(&self, user_id: &str) -> Result<AdminClaim, StoreError> {
        let _guard = self.write_lock.lock().await;

        match self.setup_state() {
            SetupState::Configured { admin_id } if admin_id == user_id => Ok(AdminClaim::Admin),
            SetupState::Configured { .. } => Ok(AdminClaim::Rejected),
            SetupState::Uninitialized => {
                let mut next = self.current.read().unwrap().clone();
                next.setup_complete = true;
                next.admin_user_id = Some(user_id.to_owned());

                write_json(&self.path, &next).await?;
                *self.current.write().unwrap() = next;

                info!("setup complete, {} is now the admin", user_id);
                Ok(AdminClaim::Claimed)
            }
        }
    }

    pub fn og_config(&self) -> OgConfig {
        self.current.read().unwrap().og.clone()
    }

    pub async fn update_og_config(&self, og: OgConfig) -> Result<OgConfig, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.current.read().unwrap().clone();
        next.og = og.normalized();

        write_json(&self.path, &next).await?;
        let og = next.og.clone();
        *self.current.write().unwrap() = next;

        Ok(og)
    }
}
