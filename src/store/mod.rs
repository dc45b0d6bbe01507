pub mod config_store;
pub mod invite_store;

use std::{io::ErrorKind, path::Path};

use derive_more::{Display, Error, From};
use log::{error, warn};
use serde::{de::DeserializeOwned, Serialize};

// re-export
pub use config_store::{AdminClaim, ConfigStore, OgConfig, SetupState};
pub use invite_store::{InviteStore, StoredInvite};

#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display(fmt = "io error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "serialization error: {}", _0)]
    Serialization(serde_json::Error),
}

/// Reads a json file, degrading to `T::default()` when it is missing or
/// unreadable.
pub(crate) async fn read_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            error!("failed to read `{}`: {}", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_slice(&data) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("`{}` is not valid, ignoring it: {}", path.display(), e);
            T::default()
        }
    }
}

/// Rewrites the whole file. Goes through a temporary file so a crash mid-write
/// leaves the previous version in place.
pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(value)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}
