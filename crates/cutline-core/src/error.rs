use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("clip not found: {0}")]
    ClipNotFound(Uuid),

    #[error("media asset not found: {0}")]
    AssetNotFound(Uuid),

    #[error("invalid timecode: {0:?}")]
    InvalidTimecode(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
