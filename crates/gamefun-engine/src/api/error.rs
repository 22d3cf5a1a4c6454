//! Error taxonomy for the progression engine.
//!
//! Every variant signals a content or integration bug rather than a transient
//! condition, so callers surface them instead of retrying.

use thiserror::Error;

use crate::api::types::LevelId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// Referenced id is absent from the catalog.
    #[error("Unknown level: {id}")]
    UnknownLevel { id: LevelId },

    /// Score outside `0..=total`, or a zero total.
    #[error("Invalid score: {score}/{total}")]
    InvalidScore { score: u32, total: u32 },

    /// Duplicate ids, dangling dependencies or a dependency cycle.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Override flag name other than `unlockAll` / `testingMode`.
    #[error("Unknown override flag: {0}")]
    UnknownOverride(String),

    /// Serialization or storage backend failure while persisting state.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl ProgressError {
    pub fn unknown_level(id: impl Into<LevelId>) -> Self {
        Self::UnknownLevel { id: id.into() }
    }

    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
