use chrono::{DateTime, Utc};

use crate::api::error::ProgressError;
use crate::api::types::LevelId;
use crate::catalog::registry::LevelCatalog;
use crate::progress::state::{CompletionRecord, OverrideFlag, Overrides, ProgressState};
use crate::progress::storage::ProgressStorage;

/// Owns the learner's `ProgressState` and writes it back after every mutation.
///
/// Mutations are applied to a copy, persisted, and only then committed, so a
/// failed write leaves the in-memory state exactly as it was.
pub struct ProgressStore<S: ProgressStorage> {
    state: ProgressState,
    storage: S,
    key: String,
}

impl<S: ProgressStorage> ProgressStore<S> {
    /// Load state saved under `key`, or start fresh with `defaults` when
    /// nothing was saved. Unreadable data is discarded with a warning, as are
    /// records for levels the catalog no longer has.
    pub fn load(
        storage: S,
        key: impl Into<String>,
        catalog: &LevelCatalog,
        defaults: Overrides,
    ) -> Result<Self, ProgressError> {
        let key = key.into();
        let state = match storage.load(&key)? {
            None => ProgressState::with_overrides(defaults),
            Some(json) => match ProgressState::from_json(&json) {
                Ok(state) => sanitize(state, catalog),
                Err(e) => {
                    log::warn!("Discarding unreadable progress under '{}': {}", key, e);
                    ProgressState::with_overrides(defaults)
                }
            },
        };
        log::info!(
            "Progress loaded: {}/{} levels completed",
            state.completed_count(),
            catalog.len()
        );
        Ok(Self { state, storage, key })
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Upsert the record for `id` and persist. `completed_at` is set only on
    /// the first completion.
    pub fn record_completion(
        &mut self,
        catalog: &LevelCatalog,
        id: &str,
        score: u32,
        total: u32,
        now: DateTime<Utc>,
    ) -> Result<&CompletionRecord, ProgressError> {
        let level = catalog.get(id)?;
        if total == 0 || score > total {
            return Err(ProgressError::InvalidScore { score, total });
        }

        let mut next = self.state.clone();
        next.upsert(level.id.clone(), score, total, now);
        self.commit(next)?;
        log::debug!("Level '{}' completed: {}/{}", id, score, total);

        self.state
            .record_for(id)
            .ok_or_else(|| ProgressError::unknown_level(id))
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.state.is_completed(id)
    }

    pub fn record_for(&self, id: &str) -> Option<&CompletionRecord> {
        self.state.record_for(id)
    }

    pub fn get_override(&self, flag: OverrideFlag) -> bool {
        self.state.overrides.get(flag)
    }

    pub fn set_override(&mut self, flag: OverrideFlag, value: bool) -> Result<(), ProgressError> {
        let mut next = self.state.clone();
        next.overrides.set(flag, value);
        self.commit(next)?;
        log::debug!("Override {} = {}", flag, value);
        Ok(())
    }

    /// Flip a flag and return its new value.
    pub fn toggle_override(&mut self, flag: OverrideFlag) -> Result<bool, ProgressError> {
        let value = !self.get_override(flag);
        self.set_override(flag, value)?;
        Ok(value)
    }

    /// Both flags back to `false`.
    pub fn reset_overrides(&mut self) -> Result<(), ProgressError> {
        let mut next = self.state.clone();
        next.overrides = Overrides::default();
        self.commit(next)
    }

    /// Drop every completion record. Overrides are kept.
    pub fn reset(&mut self) -> Result<(), ProgressError> {
        let next = ProgressState::with_overrides(self.state.overrides);
        self.commit(next)?;
        log::debug!("Progress reset");
        Ok(())
    }

    fn commit(&mut self, next: ProgressState) -> Result<(), ProgressError> {
        let json = next.to_json()?;
        self.storage.save(&self.key, &json)?;
        self.state = next;
        Ok(())
    }
}

fn sanitize(mut state: ProgressState, catalog: &LevelCatalog) -> ProgressState {
    state.records.retain(|id: &LevelId, record| {
        if !catalog.contains(id.as_str()) {
            log::warn!("Dropping progress for unknown level '{}'", id);
            false
        } else if !record.is_valid() {
            log::warn!(
                "Dropping invalid score {}/{} for level '{}'",
                record.score,
                record.total,
                id
            );
            false
        } else {
            true
        }
    });
    state
}
