use gamefun_engine::{
    Clock, EngineConfig, LevelCatalog, LevelState, OverrideFlag, ProgressError,
    ProgressStorage, ProgressionEngine, SystemClock,
};
#[cfg(feature = "i18n")]
use gamefun_engine::{translate, Locale};

/// Browser-facing wrapper around a `ProgressionEngine`.
///
/// Converts engine results into the shapes the TypeScript side reads: plain
/// strings, JSON documents, and error messages. Holds no JS types itself, so
/// it is tested natively.
pub struct ProgressSession<S: ProgressStorage, C: Clock = SystemClock> {
    engine: ProgressionEngine<S, C>,
    #[cfg(feature = "i18n")]
    locale: Locale,
}

fn describe(err: ProgressError) -> String {
    err.to_string()
}

fn flag(name: &str) -> Result<OverrideFlag, String> {
    name.parse::<OverrideFlag>().map_err(describe)
}

impl<S: ProgressStorage> ProgressSession<S, SystemClock> {
    pub fn new(catalog: LevelCatalog, storage: S, config: EngineConfig) -> Result<Self, String> {
        Self::with_clock(catalog, storage, config, SystemClock::new())
    }
}

impl<S: ProgressStorage, C: Clock> ProgressSession<S, C> {
    pub fn with_clock(
        catalog: LevelCatalog,
        storage: S,
        config: EngineConfig,
        clock: C,
    ) -> Result<Self, String> {
        #[cfg(feature = "i18n")]
        let locale = config.default_locale;
        let engine =
            ProgressionEngine::with_clock(catalog, storage, config, clock).map_err(describe)?;
        Ok(Self {
            engine,
            #[cfg(feature = "i18n")]
            locale,
        })
    }

    pub fn engine(&self) -> &ProgressionEngine<S, C> {
        &self.engine
    }

    pub fn is_unlocked(&self, level_id: &str) -> Result<bool, String> {
        self.engine.is_unlocked(level_id).map_err(describe)
    }

    /// `"locked"`, `"unlocked"` or `"completed"`.
    pub fn level_state(&self, level_id: &str) -> Result<String, String> {
        let state = self.engine.level_state(level_id).map_err(describe)?;
        Ok(match state {
            LevelState::Locked => "locked",
            LevelState::Unlocked => "unlocked",
            LevelState::Completed => "completed",
        }
        .to_owned())
    }

    /// Records the result and returns the outcome as JSON.
    pub fn record_completion(
        &mut self,
        level_id: &str,
        score: u32,
        total: u32,
    ) -> Result<String, String> {
        let outcome = self
            .engine
            .record_completion(level_id, score, total)
            .map_err(describe)?;
        serde_json::to_string(&outcome).map_err(|e| e.to_string())
    }

    pub fn stars_for(&self, level_id: &str) -> Result<u8, String> {
        self.engine.stars_for(level_id).map(|s| s.0).map_err(describe)
    }

    pub fn score_message(&self, level_id: &str) -> Result<String, String> {
        self.engine
            .score_message(level_id)
            .map(str::to_owned)
            .map_err(describe)
    }

    pub fn unlocked_levels(&self) -> Vec<String> {
        self.engine
            .unlocked_levels()
            .into_iter()
            .map(|id| id.0)
            .collect()
    }

    /// `{"completedCount", "totalCount", "percentage", "stars"}`
    pub fn summary_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.engine.summary()).map_err(|e| e.to_string())
    }

    /// `[{"category": "basic", "levels": ["alphabet", ...]}, ...]`
    pub fn levels_by_category_json(&self) -> Result<String, String> {
        let groups: Vec<serde_json::Value> = self
            .engine
            .levels_by_category()
            .into_iter()
            .map(|(category, levels)| serde_json::json!({ "category": category, "levels": levels }))
            .collect();
        serde_json::to_string(&groups).map_err(|e| e.to_string())
    }

    pub fn get_override(&self, name: &str) -> Result<bool, String> {
        Ok(self.engine.get_override(flag(name)?))
    }

    pub fn set_override(&mut self, name: &str, value: bool) -> Result<(), String> {
        self.engine.set_override(flag(name)?, value).map_err(describe)
    }

    pub fn toggle_override(&mut self, name: &str) -> Result<bool, String> {
        self.engine.toggle_override(flag(name)?).map_err(describe)
    }

    pub fn reset_overrides(&mut self) -> Result<(), String> {
        self.engine.reset_overrides().map_err(describe)
    }

    pub fn reset(&mut self) -> Result<(), String> {
        self.engine.reset().map_err(describe)
    }

    // -- Localization --

    #[cfg(feature = "i18n")]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[cfg(feature = "i18n")]
    pub fn set_locale(&mut self, code: &str) -> Result<(), String> {
        self.locale = code.parse()?;
        log::debug!("Locale set to {}", self.locale);
        Ok(())
    }

    #[cfg(feature = "i18n")]
    pub fn translate(&self, key: &str) -> String {
        translate(key, self.locale).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gamefun_engine::{FixedClock, MemoryStorage};

    fn session() -> ProgressSession<MemoryStorage, FixedClock> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap());
        ProgressSession::with_clock(
            LevelCatalog::standard().unwrap(),
            MemoryStorage::new(),
            EngineConfig::default(),
            clock,
        )
        .unwrap()
    }

    #[test]
    fn completion_outcome_as_json() {
        let mut s = session();
        let json = s.record_completion("alphabet", 4, 5).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["levelId"], "alphabet");
        assert_eq!(value["stars"], 2);
        assert_eq!(value["message"], "Great job! Well done!");
        assert_eq!(value["newlyUnlocked"], serde_json::json!(["words"]));
    }

    #[test]
    fn level_states_as_strings() {
        let mut s = session();
        assert_eq!(s.level_state("words").unwrap(), "locked");
        s.record_completion("alphabet", 1, 1).unwrap();
        assert_eq!(s.level_state("alphabet").unwrap(), "completed");
        assert_eq!(s.level_state("words").unwrap(), "unlocked");
    }

    #[test]
    fn errors_become_messages() {
        let mut s = session();
        assert_eq!(s.is_unlocked("Alphabet").unwrap_err(), "Unknown level: Alphabet");
        assert_eq!(
            s.record_completion("words", 9, 8).unwrap_err(),
            "Invalid score: 9/8"
        );
        assert_eq!(
            s.set_override("godMode", true).unwrap_err(),
            "Unknown override flag: godMode"
        );
    }

    #[test]
    fn overrides_by_name() {
        let mut s = session();
        s.set_override("unlockAll", true).unwrap();
        assert!(s.get_override("unlockAll").unwrap());
        assert_eq!(s.unlocked_levels().len(), 9);

        assert!(s.toggle_override("testingMode").unwrap());
        s.reset_overrides().unwrap();
        assert!(!s.get_override("testingMode").unwrap());
        assert_eq!(s.unlocked_levels(), vec!["alphabet".to_owned()]);
    }

    #[test]
    fn summary_and_groups_as_json() {
        let mut s = session();
        s.record_completion("alphabet", 3, 3).unwrap();
        assert_eq!(
            s.summary_json().unwrap(),
            r#"{"completedCount":1,"totalCount":9,"percentage":11,"stars":1}"#
        );

        let groups: serde_json::Value =
            serde_json::from_str(&s.levels_by_category_json().unwrap()).unwrap();
        assert_eq!(groups[0]["category"], "basic");
        assert_eq!(groups[2]["levels"][0], "memory-game");
    }

    #[test]
    fn reset_clears_stars() {
        let mut s = session();
        s.record_completion("alphabet", 3, 3).unwrap();
        assert_eq!(s.stars_for("alphabet").unwrap(), 3);
        assert_eq!(s.score_message("alphabet").unwrap(), "Perfect! Amazing work!");
        s.reset().unwrap();
        assert_eq!(s.stars_for("alphabet").unwrap(), 0);
    }

    #[cfg(feature = "i18n")]
    #[test]
    fn translates_in_session_locale() {
        let mut s = session();
        assert_eq!(s.locale(), Locale::He);
        s.set_locale("en").unwrap();
        assert_eq!(s.translate("words.title"), "Simple Words");
        assert!(s.set_locale("de").is_err());
        assert_eq!(s.locale(), Locale::En);
    }
}
