use derive_more::{Display, Error};
use serde::Deserialize;

pub type DiscordResult<T> = Result<T, DiscordError>;

#[derive(Debug, Display, Error)]
pub enum DiscordError {
    #[display(fmt = "no bot token configured")]
    MissingBotToken,
    #[display(fmt = "request to discord failed: {}", _0)]
    Transport(reqwest::Error),
    #[display(fmt = "discord answered {}: {}", status, message)]
    Api { status: u16, message: String },
}

impl DiscordError {
    /// Upstream http status, if discord actually answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            DiscordError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream error message, if discord actually answered.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            DiscordError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DiscordError {
    fn from(err: reqwest::Error) -> Self {
        DiscordError::Transport(err)
    }
}

/// Body discord sends alongside non-2xx responses.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub code: Option<u32>,
}
