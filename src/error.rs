use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("invalid article: {0}")]
    Validation(String),
    #[error("guide storage unavailable at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file invalid or unreadable: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GuideError>;

impl GuideError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
impl GuideError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
