//! Snapshot serialization: the feed as the presentation layer sees it.
//!
//! A snapshot is a detached copy: the full ordered record sequence,
//! the active config, and whether more records can be requested.

use crate::{
    config::GenerationConfig,
    record::Record,
    types::{Epoch, RecordIndex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedSnapshot {
    pub config: Option<GenerationConfig>,
    pub epoch: Epoch,
    pub last_index: RecordIndex,
    pub has_more: bool,
    pub records: Vec<Record>,
}

impl FeedSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
