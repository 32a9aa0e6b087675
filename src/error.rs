use thiserror::Error;

use crate::ObjectId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} was never observed")]
    ObjectNotFound(ObjectId),

    #[error("frame {0} was never ingested")]
    FrameNotFound(u32),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    ConfigError(#[from] serde_yaml::Error),
}

impl Error {
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ObjectNotFound(_) | Error::FrameNotFound(_))
    }
}
