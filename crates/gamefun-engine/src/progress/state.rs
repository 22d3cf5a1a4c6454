use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::error::ProgressError;
use crate::api::types::LevelId;

/// Outcome of a learner finishing a level at least once.
/// Keyed by level id inside `ProgressState::records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Correct responses in the latest session.
    pub score: u32,
    /// Scoreable items in the latest session. Always positive.
    pub total: u32,
    /// First completion. Never cleared by later completions.
    pub completed_at: DateTime<Utc>,
}

impl CompletionRecord {
    pub fn is_valid(&self) -> bool {
        self.total > 0 && self.score <= self.total
    }
}

/// Debug switches that bypass the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(default)]
    pub unlock_all: bool,
    #[serde(default)]
    pub testing_mode: bool,
}

impl Overrides {
    pub fn get(&self, flag: OverrideFlag) -> bool {
        match flag {
            OverrideFlag::UnlockAll => self.unlock_all,
            OverrideFlag::TestingMode => self.testing_mode,
        }
    }

    pub fn set(&mut self, flag: OverrideFlag, value: bool) {
        match flag {
            OverrideFlag::UnlockAll => self.unlock_all = value,
            OverrideFlag::TestingMode => self.testing_mode = value,
        }
    }

    /// True when either flag short-circuits dependency checks.
    pub fn any(&self) -> bool {
        self.unlock_all || self.testing_mode
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideFlag {
    UnlockAll,
    TestingMode,
}

impl OverrideFlag {
    pub const ALL: [OverrideFlag; 2] = [OverrideFlag::UnlockAll, OverrideFlag::TestingMode];

    pub fn name(self) -> &'static str {
        match self {
            OverrideFlag::UnlockAll => "unlockAll",
            OverrideFlag::TestingMode => "testingMode",
        }
    }
}

impl fmt::Display for OverrideFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverrideFlag {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverrideFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| ProgressError::UnknownOverride(s.to_owned()))
    }
}

/// Everything persisted for one learner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressState {
    /// At most one record per level; re-completion overwrites.
    #[serde(default)]
    pub records: BTreeMap<LevelId, CompletionRecord>,
    #[serde(default)]
    pub overrides: Overrides,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: Overrides) -> Self {
        Self {
            records: BTreeMap::new(),
            overrides,
        }
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn record_for(&self, id: &str) -> Option<&CompletionRecord> {
        self.records.get(id)
    }

    pub fn completed_count(&self) -> usize {
        self.records.len()
    }

    /// Insert or overwrite the record for `id`, keeping the first `completed_at`.
    pub(crate) fn upsert(&mut self, id: LevelId, score: u32, total: u32, now: DateTime<Utc>) {
        self.records
            .entry(id)
            .and_modify(|record| {
                record.score = score;
                record.total = total;
            })
            .or_insert(CompletionRecord {
                score,
                total,
                completed_at: now,
            });
    }

    pub fn to_json(&self) -> Result<String, ProgressError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProgressError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn upsert_keeps_first_completion_time() {
        let mut state = ProgressState::new();
        state.upsert(LevelId::from("words"), 2, 8, at(9));
        state.upsert(LevelId::from("words"), 8, 8, at(11));

        let record = state.record_for("words").unwrap();
        assert_eq!(record.score, 8);
        assert_eq!(record.total, 8);
        assert_eq!(record.completed_at, at(9));
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn round_trip_preserves_records_and_overrides() {
        let mut state = ProgressState::new();
        state.upsert(LevelId::from("alphabet"), 26, 26, at(8));
        state.upsert(LevelId::from("words"), 4, 5, at(10));
        state.overrides.set(OverrideFlag::UnlockAll, true);

        let json = state.to_json().unwrap();
        let restored = ProgressState::from_json(&json).unwrap();
        assert_eq!(restored, state);
        assert!(restored.overrides.unlock_all);
        assert!(!restored.overrides.testing_mode);
    }

    #[test]
    fn persisted_layout_uses_camel_case() {
        let mut state = ProgressState::new();
        state.upsert(LevelId::from("alphabet"), 3, 3, at(8));
        let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();

        assert_eq!(value["records"]["alphabet"]["score"], 3);
        assert_eq!(value["records"]["alphabet"]["total"], 3);
        assert!(value["records"]["alphabet"]["completedAt"].is_string());
        assert_eq!(value["overrides"]["unlockAll"], false);
        assert_eq!(value["overrides"]["testingMode"], false);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let state = ProgressState::from_json("{}").unwrap();
        assert_eq!(state, ProgressState::new());
    }

    #[test]
    fn override_flag_names() {
        assert_eq!("unlockAll".parse::<OverrideFlag>().unwrap(), OverrideFlag::UnlockAll);
        assert_eq!("testingMode".parse::<OverrideFlag>().unwrap(), OverrideFlag::TestingMode);
        assert!(matches!(
            "unlockall".parse::<OverrideFlag>(),
            Err(ProgressError::UnknownOverride(_))
        ));
    }
}
