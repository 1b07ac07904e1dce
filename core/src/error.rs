use thiserror::Error;

use crate::types::RecordIndex;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("Generation failed for record {index} ({field}): {reason}")]
    Generation {
        index: RecordIndex,
        field: &'static str,
        reason: String,
    },

    #[error("Feed not initialized")]
    NotInitialized,

    #[error("A page is already being generated")]
    PageInFlight,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FeedError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config { reason: reason.into() }
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
