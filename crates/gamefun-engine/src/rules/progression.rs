use serde::Serialize;

use crate::api::error::ProgressError;
use crate::api::types::{Category, LevelId, LevelState, ProgressSummary, Stars};
use crate::catalog::registry::LevelCatalog;
use crate::progress::state::{CompletionRecord, ProgressState};
use crate::rules::scoring::{menu_stars, ScoreTier};

/// Read-only decisions over a catalog and a learner's state.
///
/// Nothing is cached: every query recomputes from the state it borrows, so a
/// completion is visible to the very next call.
#[derive(Debug, Clone, Copy)]
pub struct ProgressionRules<'a> {
    catalog: &'a LevelCatalog,
    state: &'a ProgressState,
}

/// Result of recording a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    pub level_id: LevelId,
    pub score: u32,
    pub total: u32,
    pub stars: Stars,
    pub message: &'static str,
    /// Levels that were locked before this completion and are playable now.
    pub newly_unlocked: Vec<LevelId>,
}

impl<'a> ProgressionRules<'a> {
    pub fn new(catalog: &'a LevelCatalog, state: &'a ProgressState) -> Self {
        Self { catalog, state }
    }

    /// Overrides open everything; otherwise every direct dependency must be
    /// completed. Levels without dependencies are always open.
    pub fn is_unlocked(&self, id: &str) -> Result<bool, ProgressError> {
        let deps = self.catalog.dependencies_of(id)?;
        if self.state.overrides.any() {
            return Ok(true);
        }
        Ok(deps.iter().all(|dep| self.state.is_completed(dep.as_str())))
    }

    /// A completed level stays `Completed` even if a prerequisite was later
    /// reset; otherwise the state follows `is_unlocked`.
    pub fn level_state(&self, id: &str) -> Result<LevelState, ProgressError> {
        let unlocked = self.is_unlocked(id)?;
        Ok(if self.state.is_completed(id) {
            LevelState::Completed
        } else if unlocked {
            LevelState::Unlocked
        } else {
            LevelState::Locked
        })
    }

    /// Unlocked ids in catalog declaration order.
    pub fn unlocked_levels(&self) -> Vec<LevelId> {
        let open_all = self.state.overrides.any();
        self.catalog
            .iter()
            .filter(|level| {
                open_all
                    || level
                        .dependencies
                        .iter()
                        .all(|dep| self.state.is_completed(dep.as_str()))
            })
            .map(|level| level.id.clone())
            .collect()
    }

    /// Stars earned by the stored record; zero for a level never played.
    pub fn stars_for(&self, id: &str) -> Result<Stars, ProgressError> {
        Ok(self.tier_for(id)?.stars())
    }

    /// Feedback message for the stored record. A level never played gets the
    /// lowest-tier message, matching its zero stars.
    pub fn score_message(&self, id: &str) -> Result<&'static str, ProgressError> {
        Ok(self.tier_for(id)?.message())
    }

    pub fn record_for(&self, id: &str) -> Result<Option<&'a CompletionRecord>, ProgressError> {
        self.catalog.get(id)?;
        Ok(self.state.record_for(id))
    }

    pub fn summary(&self) -> ProgressSummary {
        let completed_count = self
            .state
            .records
            .keys()
            .filter(|id| self.catalog.contains(id.as_str()))
            .count();
        let total_count = self.catalog.len();
        let percentage = if total_count == 0 {
            0
        } else {
            (completed_count as f64 / total_count as f64 * 100.0).round() as u32
        };
        ProgressSummary {
            completed_count,
            total_count,
            percentage,
            stars: menu_stars(completed_count),
        }
    }

    /// Level ids grouped the way the level menu lays them out.
    pub fn levels_by_category(&self) -> Vec<(Category, Vec<LevelId>)> {
        self.catalog
            .by_category()
            .into_iter()
            .map(|(category, levels)| {
                (category, levels.into_iter().map(|l| l.id.clone()).collect())
            })
            .collect()
    }

    fn tier_for(&self, id: &str) -> Result<ScoreTier, ProgressError> {
        Ok(match self.record_for(id)? {
            Some(record) => ScoreTier::of(record.score, record.total),
            None => ScoreTier::NeedsPractice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Difficulty;
    use crate::catalog::descriptor::LevelDescriptor;
    use crate::progress::state::OverrideFlag;
    use chrono::{TimeZone, Utc};

    fn abc() -> LevelCatalog {
        LevelCatalog::new(vec![
            LevelDescriptor::new("A", Category::Basic, Difficulty::Easy),
            LevelDescriptor::new("B", Category::Basic, Difficulty::Medium).depends_on("A"),
            LevelDescriptor::new("C", Category::Reading, Difficulty::Hard).depends_on("B"),
        ])
        .unwrap()
    }

    fn complete(state: &mut ProgressState, id: &str, score: u32, total: u32) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        state.upsert(LevelId::from(id), score, total, now);
    }

    #[test]
    fn chain_unlocks_one_step_at_a_time() {
        let catalog = abc();
        let mut state = ProgressState::new();

        let rules = ProgressionRules::new(&catalog, &state);
        assert!(rules.is_unlocked("A").unwrap());
        assert!(!rules.is_unlocked("B").unwrap());
        assert!(!rules.is_unlocked("C").unwrap());

        complete(&mut state, "A", 3, 3);
        let rules = ProgressionRules::new(&catalog, &state);
        assert!(rules.is_unlocked("B").unwrap());
        assert!(!rules.is_unlocked("C").unwrap());

        complete(&mut state, "B", 1, 3);
        let rules = ProgressionRules::new(&catalog, &state);
        assert!(rules.is_unlocked("C").unwrap());
    }

    #[test]
    fn either_override_opens_everything() {
        let catalog = abc();
        for flag in OverrideFlag::ALL {
            let mut state = ProgressState::new();
            state.overrides.set(flag, true);
            let rules = ProgressionRules::new(&catalog, &state);
            assert!(rules.is_unlocked("C").unwrap(), "{} should unlock C", flag);
            assert_eq!(rules.unlocked_levels().len(), 3);
        }
    }

    #[test]
    fn root_levels_are_always_unlocked() {
        let catalog = LevelCatalog::standard().unwrap();
        let mut state = ProgressState::new();
        complete(&mut state, "words", 2, 8);
        let rules = ProgressionRules::new(&catalog, &state);
        for level in catalog.iter().filter(|l| l.dependencies.is_empty()) {
            assert!(rules.is_unlocked(level.id.as_str()).unwrap());
        }
    }

    #[test]
    fn unknown_ids_error() {
        let catalog = abc();
        let state = ProgressState::new();
        let rules = ProgressionRules::new(&catalog, &state);
        assert!(matches!(rules.is_unlocked("a"), Err(ProgressError::UnknownLevel { .. })));
        assert!(rules.stars_for("Z").is_err());
        assert!(rules.level_state("Z").is_err());
    }

    #[test]
    fn unlocked_levels_follow_declaration_order() {
        let catalog = LevelCatalog::standard().unwrap();
        let mut state = ProgressState::new();
        for id in ["alphabet", "words", "drag-drop", "stories", "comics"] {
            complete(&mut state, id, 1, 1);
        }
        let rules = ProgressionRules::new(&catalog, &state);
        let ids: Vec<String> = rules.unlocked_levels().into_iter().map(|id| id.0).collect();
        assert_eq!(
            ids,
            vec![
                "alphabet",
                "words",
                "drag-drop",
                "stories",
                "comics",
                "advanced-reading",
                "memory-game",
            ]
        );
    }

    #[test]
    fn stars_and_messages_from_record() {
        let catalog = abc();
        let mut state = ProgressState::new();
        complete(&mut state, "A", 4, 5);
        let rules = ProgressionRules::new(&catalog, &state);

        assert_eq!(rules.stars_for("A").unwrap(), Stars(2));
        assert_eq!(rules.score_message("A").unwrap(), "Great job! Well done!");
        assert_eq!(rules.stars_for("B").unwrap(), Stars(0));
        assert_eq!(rules.score_message("B").unwrap(), "Good effort! Keep practicing!");
    }

    #[test]
    fn level_states() {
        let catalog = abc();
        let mut state = ProgressState::new();
        complete(&mut state, "A", 3, 3);
        let rules = ProgressionRules::new(&catalog, &state);

        assert_eq!(rules.level_state("A").unwrap(), LevelState::Completed);
        assert_eq!(rules.level_state("B").unwrap(), LevelState::Unlocked);
        assert_eq!(rules.level_state("C").unwrap(), LevelState::Locked);
    }

    #[test]
    fn summary_rounds_percentage() {
        let catalog = LevelCatalog::standard().unwrap();
        let mut state = ProgressState::new();
        for id in ["alphabet", "words", "drag-drop"] {
            complete(&mut state, id, 1, 1);
        }
        let summary = ProgressionRules::new(&catalog, &state).summary();
        assert_eq!(
            summary,
            ProgressSummary {
                completed_count: 3,
                total_count: 9,
                percentage: 33,
                stars: Stars(1),
            }
        );
    }

    #[test]
    fn summary_menu_stars_track_completed_count() {
        let catalog = LevelCatalog::standard().unwrap();
        let ids: Vec<LevelId> = catalog.iter().map(|l| l.id.clone()).collect();
        for (count, expected) in [(0, 0), (1, 1), (3, 1), (4, 2), (9, 3)] {
            let mut state = ProgressState::new();
            for id in &ids[..count] {
                complete(&mut state, id.as_str(), 1, 1);
            }
            let summary = ProgressionRules::new(&catalog, &state).summary();
            assert_eq!(summary.stars, Stars(expected), "{} completed", count);
        }
    }

    #[test]
    fn summary_of_empty_catalog() {
        let catalog = LevelCatalog::new(Vec::new()).unwrap();
        let state = ProgressState::new();
        let summary = ProgressionRules::new(&catalog, &state).summary();
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.stars, Stars(0));
    }

    #[test]
    fn groups_ids_by_category() {
        let catalog = abc();
        let state = ProgressState::new();
        let groups = ProgressionRules::new(&catalog, &state).levels_by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Basic);
        assert_eq!(groups[0].1, vec![LevelId::from("A"), LevelId::from("B")]);
        assert_eq!(groups[1].1, vec![LevelId::from("C")]);
    }
}
